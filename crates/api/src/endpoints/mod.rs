pub mod analytics;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod files;
pub mod gamification;
pub mod newsletter;
pub mod notifications;
pub mod projects;
pub mod reports;
pub mod resources;
pub mod search;
pub mod tasks;
pub mod users;
pub mod volunteers;

// Backend endpoint tree, one table per module:
//
// /auth/*                       AuthApi           (login/register/refresh/reset are public)
// /blog/posts, /blog/categories BlogApi
// /projects/                    ProjectsApi
// /tasks/                       TasksApi
// /volunteers/                  VolunteersApi     (incl. /volunteers/hours/*)
// /gamification/*               GamificationApi
// /analytics/*                  AnalyticsApi
// /reports/                     ReportsApi        (incl. raw /reports/export/{kind})
// /resources/                   ResourcesApi
// /search/                      SearchApi
// /users/                       UsersApi
// /notifications/               NotificationsApi  (incl. SSE /notifications/stream)
// /newsletter/*                 NewsletterApi     (subscribe/unsubscribe are public)
// /contact/                     ContactApi        (submit is public)
// /files/*                      FilesApi          (multipart upload)
