//! Human-readable and JSON rendering of simulation reports

use anyhow::Result;
use hamcode_core::bits::BitVector;
use hamcode_frame::channel::NoiseModel;
use std::fmt::Write;

use crate::sim::SimReport;

/// Render words as `0`/`1` strings separated by spaces
pub fn render_words(words: &[BitVector]) -> String {
    words
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render bytes as 8-bit groups, most significant bit first
pub fn render_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_noise(noise: NoiseModel) -> String {
    match noise {
        NoiseModel::None => "no errors".to_string(),
        NoiseModel::SingleBit => "at most one error per word".to_string(),
        NoiseModel::MultiBit { max_errors } => {
            format!("up to {} errors per word", max_errors)
        }
    }
}

/// Plain text report, one section per pipeline stage
pub fn render_text(report: &SimReport) -> String {
    let mut out = String::new();
    let stats = &report.decoded.stats;

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Payload width {} bits, word length {} bits, control positions {:?}",
        report.payload_width, report.word_len, report.control_positions
    );
    let _ = writeln!(out, "\nSource bits:\n{}", render_bytes(&report.source_text));
    let _ = writeln!(out, "\nHamming code of the text:\n{}", render_words(&report.encoded));
    let _ = writeln!(out, "\nSource checksum: {}", report.source_checksum);

    let _ = writeln!(out, "\nChannel: {}", describe_noise(report.noise));
    if report.noise != NoiseModel::None {
        let _ = writeln!(
            out,
            "{} bit errors injected into {} words",
            report.injection.total_flips, report.injection.disturbed_words
        );
        let _ = writeln!(out, "\nReceived code:\n{}", render_words(&report.received));
    }

    let _ = writeln!(out, "\nWords delivered intact: {}", stats.clean_words);
    let _ = writeln!(out, "Words delivered with errors: {}", stats.detected_errors);
    let _ = writeln!(
        out,
        "\nCode with recomputed control bits:\n{}",
        render_words(&report.decoded.recomputed)
    );
    let _ = writeln!(out, "\nErrors corrected: {}", stats.corrected_errors);
    if stats.uncorrectable_errors > 0 {
        let _ = writeln!(
            out,
            "Words with an unusable syndrome: {}",
            stats.uncorrectable_errors
        );
    }
    let _ = writeln!(
        out,
        "Code after correction:\n{}",
        render_words(&report.decoded.corrected)
    );

    let _ = writeln!(out, "\nDecoded text:\n{}", report.decoded_text());
    let _ = writeln!(out, "Decoded checksum: {}", report.decoded_checksum);
    let _ = writeln!(out, "\nChecksums equal: {}", report.checksums_match());
    let _ = writeln!(out, "Texts equal: {}", report.texts_match());

    let verdict = if report.checksums_match() {
        "Text recovered"
    } else {
        "Text could not be recovered"
    };
    let _ = writeln!(out, "\n{}", verdict);
    out
}

/// Pretty-printed JSON report
pub fn render_json(report: &SimReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
