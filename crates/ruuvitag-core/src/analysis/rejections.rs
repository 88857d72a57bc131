use std::collections::HashMap;

use crate::RejectionSummary;
use crate::protocols::common::error::DecodeError;

const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Default, Clone)]
pub(crate) struct RejectionStats {
    pub message: String,
    pub count: u64,
    pub examples: Vec<String>,
}

pub(crate) fn add_rejection(
    stats: &mut HashMap<&'static str, RejectionStats>,
    line: u64,
    err: &DecodeError,
) {
    let entry = stats.entry(err.id()).or_default();
    if entry.message.is_empty() {
        entry.message = rejection_message(err).to_string();
    }
    entry.count += 1;
    if entry.examples.len() < MAX_EXAMPLES {
        entry.examples.push(format!("line {line}: {err}"));
    }
}

pub(crate) fn build_rejection_summaries(
    stats: HashMap<&'static str, RejectionStats>,
) -> Vec<RejectionSummary> {
    let mut summaries: Vec<RejectionSummary> = stats
        .into_iter()
        .map(|(id, stats)| RejectionSummary {
            id: id.to_string(),
            message: stats.message,
            count: stats.count,
            examples: stats.examples,
        })
        .collect();
    summaries.sort_by(|a, b| a.id.cmp(&b.id));
    summaries
}

fn rejection_message(err: &DecodeError) -> &'static str {
    match err {
        DecodeError::InvalidLength { .. } => "Payload length does not match its data format",
        DecodeError::UnrecognizedPrefix => "Payload is not a supported manufacturer data format",
        DecodeError::SentinelValues { .. } => "Reading contains not-available sentinel values",
        DecodeError::MalformedLayout { .. } => "Payload layout could not be read",
    }
}
