//! Compare command implementation for the Vicinity CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use vicinity_core::{ComparisonRequest, ComparisonResult, Region};
use vicinity_data::{load_catalogue, load_dataset};
use vicinity_service::{BlockingComparisonService, ResolverConfig};

use crate::{
    ARG_COMPARE_CATALOGUE, ARG_COMPARE_DATASET, ARG_COMPARE_FETCH_TIMEOUT_MS,
    ARG_COMPARE_MAX_CONCURRENT_FETCHES, ARG_COMPARE_REQUEST, CliError, ENV_COMPARE_DATASET,
    ENV_COMPARE_REQUEST,
};

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "compare",
    long_about = "Compare neighborhoods listed in a JSON dataset. The request \
                 names a region, at least two neighborhoods and the metrics to \
                 rank on; the full comparison result is printed as JSON.",
    about = "Compare neighborhoods and print the result as JSON"
)]
#[ortho_config(prefix = "VICINITY")]
pub(crate) struct CompareArgs {
    /// Path to a JSON file with `region`, `neighborhoods` and `metrics`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the JSON dataset serving neighborhoods and metrics.
    #[arg(long = ARG_COMPARE_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Replace the standard metric catalogue with one loaded from JSON.
    #[arg(long = ARG_COMPARE_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Per-fetch deadline in milliseconds; `0` disables the deadline.
    #[arg(long = ARG_COMPARE_FETCH_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) fetch_timeout_ms: Option<u64>,
    /// Upper bound on snapshot fetches awaited at once.
    #[arg(long = ARG_COMPARE_MAX_CONCURRENT_FETCHES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_concurrent_fetches: Option<NonZeroUsize>,
}

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<CompareConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CompareConfig::try_from(merged)
    }
}

/// Resolved `compare` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompareConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the JSON dataset.
    pub(crate) dataset: Utf8PathBuf,
    /// Optional custom metric catalogue.
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Fan-out settings for the snapshot resolver.
    pub(crate) resolver: ResolverConfig,
}

impl TryFrom<CompareArgs> for CompareConfig {
    type Error = CliError;

    fn try_from(args: CompareArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_COMPARE_REQUEST,
            env: ENV_COMPARE_REQUEST,
        })?;
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_COMPARE_DATASET,
            env: ENV_COMPARE_DATASET,
        })?;

        let mut resolver = ResolverConfig::default();
        if let Some(limit) = args.max_concurrent_fetches {
            resolver = resolver.with_max_concurrent_fetches(limit);
        }
        if let Some(millis) = args.fetch_timeout_ms {
            let timeout = (millis > 0).then_some(Duration::from_millis(millis));
            resolver = resolver.with_fetch_timeout(timeout);
        }

        Ok(Self {
            request_path,
            dataset,
            catalogue: args.catalogue,
            resolver,
        })
    }
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &mut stdout)
}

pub(crate) fn run_compare_with(args: CompareArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let result = execute_compare(&config)?;
    write_result(writer, &result)
}

pub(crate) fn execute_compare(config: &CompareConfig) -> Result<ComparisonResult, CliError> {
    let request = load_request(&config.request_path)?;
    let dataset = Arc::new(load_dataset(&config.dataset).map_err(CliError::Dataset)?);
    let mut service =
        BlockingComparisonService::new(Arc::clone(&dataset), dataset)?.with_config(config.resolver);
    if let Some(path) = &config.catalogue {
        let registry = load_catalogue(path).map_err(CliError::Catalogue)?;
        service = service.with_registry(registry);
    }
    Ok(service.compare(&request)?)
}

/// Loads and validates a JSON-encoded comparison request from disk.
///
/// The file is decoded into its raw shape first so that malformed JSON and
/// rejected values surface as distinct errors.
pub(crate) fn load_request(path: &Utf8Path) -> Result<ComparisonRequest, CliError> {
    #[derive(Deserialize)]
    struct RequestFile {
        region: Region,
        neighborhoods: Vec<String>,
        metrics: Vec<String>,
    }

    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let raw: RequestFile = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    ComparisonRequest::new(raw.region, raw.neighborhoods, raw.metrics).map_err(|source| {
        CliError::InvalidRequest {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_result(writer: &mut dyn Write, result: &ComparisonResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(result).map_err(CliError::SerialiseResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CompareConfig, CliError> {
    let merged = CompareArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CompareConfig::try_from(merged)
}
