use reqwest::Url;
use serde::Serialize;
use wedding_access::{authenticate, UserProfile};
use wedding_directory::DirectorySource;
use wedding_navigation::select_tabs;
use wedding_page_ui::PageSurface;
use wedding_session::{persist_session, SessionScope};

use crate::init_error::{InitError, InitStage};

/// Query parameter carrying the invitation token.
pub const TOKEN_QUERY_PARAM: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InitOutcome {
    Done {
        user: UserProfile,
        selected_tab_count: usize,
    },
    Error {
        stage: InitStage,
        message: String,
    },
}

impl InitOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Done { .. } => None,
            Self::Error { message, .. } => Some(message.as_str()),
        }
    }
}

/// Returns the first `token` query value of `page_url`; an empty value counts
/// as absent, even when a later `token` pair is non-empty.
pub fn extract_token(page_url: &Url) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Runs the access gate for one page load.
///
/// Every failure is reported on `surface` and returned as
/// [`InitOutcome::Error`]; nothing propagates past this call.
pub async fn initialize_session<S, P>(
    directory_source: &dyn DirectorySource,
    page_url: &Url,
    session: &mut S,
    surface: &mut P,
) -> InitOutcome
where
    S: SessionScope + ?Sized,
    P: PageSurface + ?Sized,
{
    tracing::debug!(source = %directory_source.describe(), "initializing access gate");
    match run_stages(directory_source, page_url, session, surface).await {
        Ok((user, selected_tab_count)) => {
            tracing::info!(
                role = user.role.as_str(),
                table = user.table,
                selected_tab_count,
                "access gate initialized"
            );
            InitOutcome::Done { user, selected_tab_count }
        }
        Err(error) => {
            let stage = error.stage();
            tracing::warn!(stage = stage.as_str(), error = %error, "access gate stopped");
            let message = error.user_message();
            surface.show_error(message.as_str());
            InitOutcome::Error { stage, message }
        }
    }
}

async fn run_stages<S, P>(
    directory_source: &dyn DirectorySource,
    page_url: &Url,
    session: &mut S,
    surface: &mut P,
) -> Result<(UserProfile, usize), InitError>
where
    S: SessionScope + ?Sized,
    P: PageSurface + ?Sized,
{
    let directory = directory_source.load().await?;

    let token = extract_token(page_url).ok_or(InitError::MissingToken)?;
    tracing::debug!(token_len = token.len(), "token detected");

    let user = authenticate(token.as_str(), &directory)?;

    persist_session(session, token.as_str(), &user)?;

    surface.show_welcome(user.name.as_str());
    let tabs = select_tabs(user.role);
    surface.render_tabs(&tabs);
    surface.hide_loading();
    Ok((user, tabs.len()))
}
