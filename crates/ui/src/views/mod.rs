mod admin;
mod dashboard;
mod landing;
mod login;
mod logout;
mod notices;
mod results;
mod state;
mod test_list;
mod verify;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use dashboard::{AttemptRow, DashboardView, StatCards};
pub use landing::LandingView;
pub use login::LoginView;
pub use logout::LogoutButton;
pub use notices::{Notice, NoticeKind, NoticeTray, Notices, use_notices_provider};
pub use results::ResultsView;
pub use state::{
    LoadError, ViewError, ViewState, report_load_failure, view_state_from_resource,
};
pub use take_test::TakeTestView;
pub use test_list::TestsView;
pub use verify::VerifyView;
