//! Extraction engine
//!
//! Cut and concatenation run through the media tool with a two-tier policy:
//! each operation has a primary method and at most one fallback, tried once.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatClipError, CatClipResult};
use crate::ports::{Method, ToolOutcome};

pub mod copy;
pub mod reencode;
pub mod splicer;

pub use reencode::ReencodeSettings;
pub use splicer::{SpliceReport, Splicer};

/// Primary method for an operation and the method to retry with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    pub primary: Method,
    pub fallback: Option<Method>,
}

impl FallbackPolicy {
    pub fn new(primary: Method, fallback: Option<Method>) -> Self {
        Self { primary, fallback }
    }

    /// Stream copy first, re-encode on failure
    pub fn copy_then_reencode() -> Self {
        Self::new(Method::StreamCopy, Some(Method::Reencode))
    }
}

/// Policies for every media tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    pub cut: FallbackPolicy,
    pub concat: FallbackPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            cut: FallbackPolicy::copy_then_reencode(),
            concat: FallbackPolicy::copy_then_reencode(),
        }
    }
}

/// Successful tool run and the method that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRun {
    pub method: Method,
    pub output_path: PathBuf,
    pub fell_back: bool,
}

/// Run `op` with the primary method, retrying once with the fallback.
///
/// Returns a `ToolInvocation` error carrying the last stderr when every
/// allowed method failed.
pub fn run_with_fallback<F>(policy: &FallbackPolicy, operation: &str, mut op: F) -> CatClipResult<ToolRun>
where
    F: FnMut(Method) -> ToolOutcome,
{
    debug!("{} with {}", operation, policy.primary);
    let stderr = match op(policy.primary) {
        ToolOutcome::Succeeded { output_path } => {
            return Ok(ToolRun {
                method: policy.primary,
                output_path,
                fell_back: false,
            })
        }
        ToolOutcome::Failed { stderr } => stderr,
    };

    let Some(fallback) = policy.fallback else {
        return Err(CatClipError::tool(operation, last_line(&stderr)));
    };
    warn!(
        "{} failed with {} ({}), retrying with {}",
        operation,
        policy.primary,
        last_line(&stderr),
        fallback
    );

    match op(fallback) {
        ToolOutcome::Succeeded { output_path } => Ok(ToolRun {
            method: fallback,
            output_path,
            fell_back: true,
        }),
        ToolOutcome::Failed { stderr } => Err(CatClipError::tool(operation, last_line(&stderr))),
    }
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostic output")
}
