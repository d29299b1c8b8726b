use std::path::Path;

use crate::{
    domain::UserId,
    infra::{self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError},
    usecases::context::AppContext,
};

/// Loads config, resolves the session identity, and brings logging up.
/// The CLI-provided user id wins over the config file's.
pub fn bootstrap(
    config_path: Option<&Path>,
    user_id_override: Option<UserId>,
) -> Result<AppContext, AppError> {
    let context = build_context(config_path, user_id_override)?;
    infra::logging::init(&context.config.logging)?;

    Ok(context)
}

fn build_context(
    config_path: Option<&Path>,
    user_id_override: Option<UserId>,
) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;

    let user_id = user_id_override
        .or(config.session.user_id)
        .ok_or(AppError::MissingUserId)?;

    Ok(AppContext::new(config, user_id))
}
