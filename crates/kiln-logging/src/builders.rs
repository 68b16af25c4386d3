use crate::backend::share;
use crate::backends::{
    ConsoleBackend, DashboardBackend, ErrorFileBackend, JsonLogBackend, JsonProfileBackend,
    ProfileFileBackend, TimeFileBackend,
};
use crate::error::LoggingResult;
use crate::events::{LaunchMode, MetricDescriptor};
use crate::meta::{build_run_meta, RunMeta};
use crate::paths::OutputPaths;
use crate::registry::Logger;
use std::path::Path;

/// Register one shared console backend for the learn token (when training
/// happens locally), every test token, and the profile stream.
pub fn add_console_backend(
    learn_token: &str,
    test_tokens: &[String],
    has_train: bool,
    metric_period: usize,
    iteration_count: usize,
    logger: &mut Logger,
) {
    let console = share(ConsoleBackend::new(false, metric_period, iteration_count));
    if has_train {
        logger.add_backend(learn_token, console.clone());
    }
    for token in test_tokens {
        logger.add_backend(token, console.clone());
    }
    logger.add_profile_backend(console);
}

/// Register the file backends for a run.
///
/// The learn token gets its own error file; all test tokens share one
/// error file instance (one physical file covering every test set, if a
/// test-error path is configured). Every token gets a dashboard directory
/// under `train_dir/<token>` and feeds the single shared json backend,
/// which also receives profile events. The time log always listens on the
/// profile stream; the two detailed-profile backends only when
/// `detailed_profile` is set.
pub fn add_file_backends(
    detailed_profile: bool,
    paths: &OutputPaths,
    meta: &RunMeta,
    learn_token: &str,
    test_tokens: &[String],
    metric_period: usize,
    logger: &mut Logger,
) -> LoggingResult<()> {
    let json_backend = share(JsonLogBackend::new(&paths.json_log, meta, metric_period)?);

    if !meta.learn_sets.is_empty() {
        logger.add_backend(learn_token, share(ErrorFileBackend::new(&paths.learn_error_log)?));
        logger.add_backend(
            learn_token,
            share(DashboardBackend::new(&paths.train_dir.join(learn_token))?),
        );
        logger.add_backend(learn_token, json_backend.clone());
    }

    let test_error_backend = match &paths.test_error_log {
        Some(path) if !test_tokens.is_empty() => Some(share(ErrorFileBackend::new(path)?)),
        _ => None,
    };
    for token in test_tokens {
        if let Some(backend) = &test_error_backend {
            logger.add_backend(token, backend.clone());
        }
        logger.add_backend(token, share(DashboardBackend::new(&paths.train_dir.join(token))?));
        logger.add_backend(token, json_backend.clone());
    }

    logger.add_profile_backend(share(TimeFileBackend::new(&paths.time_left_log)?));
    logger.add_profile_backend(json_backend);
    if detailed_profile {
        logger.add_profile_backend(share(ProfileFileBackend::new(&paths.profile_log)?));
        let mut json_profile_path = paths.profile_log.clone().into_os_string();
        json_profile_path.push(".json");
        logger.add_profile_backend(share(JsonProfileBackend::new(Path::new(&json_profile_path))?));
    }

    tracing::debug!(
        test_count = test_tokens.len(),
        detailed_profile,
        "registered file backends"
    );
    Ok(())
}

/// Build run metadata and register every file backend in one call.
///
/// Set names in the metadata carry the names prefix; backend routing uses
/// the raw tokens the training loop emits with.
#[allow(clippy::too_many_arguments)]
pub fn initialize_file_backends(
    paths: &OutputPaths,
    metrics: &[MetricDescriptor],
    iteration_count: usize,
    learn_token: &str,
    test_tokens: &[String],
    metric_period: usize,
    detailed_profile: bool,
    logger: &mut Logger,
) -> LoggingResult<()> {
    let learn_set_names = vec![format!("{}{}", paths.names_prefix, learn_token)];
    let test_set_names: Vec<String> = test_tokens
        .iter()
        .map(|token| format!("{}{}", paths.names_prefix, token))
        .collect();

    let meta = build_run_meta(
        iteration_count,
        &paths.experiment_name,
        metrics,
        &learn_set_names,
        &test_set_names,
        LaunchMode::Train,
    );

    add_file_backends(detailed_profile, paths, &meta, learn_token, test_tokens, metric_period, logger)
}
