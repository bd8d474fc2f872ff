//! The sample line protocol shared by all stream sources.
//!
//! Accepted forms, one sample per line:
//!
//! ```text
//! trace,timestamp,value      # timestamp = float seconds since epoch
//! trace value                # whitespace-separated, stamped on arrival
//! value                      # default trace, stamped on arrival
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Anything else is a
//! parse error; callers count those and keep going, a noisy instrument must
//! not kill the stream.

use crate::sink::Sample;

/// Outcome of parsing one raw line.
#[derive(Debug, PartialEq)]
pub enum ParsedLine {
    Sample(Sample),
    /// Blank or comment.
    Skip,
    /// Unusable content; carries the offending line for logging.
    Error(String),
}

/// Parse a single line. `default_trace` names samples in the one-column form;
/// `now_micros` stamps forms without their own timestamp.
pub fn parse_line(line: &str, default_trace: &str, now_micros: i64) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return ParsedLine::Skip;
    }

    if line.contains(',') {
        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        if fields.len() != 3 {
            return ParsedLine::Error(line.to_string());
        }
        let (Ok(secs), Ok(value)) = (fields[1].parse::<f64>(), fields[2].parse::<f64>()) else {
            return ParsedLine::Error(line.to_string());
        };
        if fields[0].is_empty() || !secs.is_finite() {
            return ParsedLine::Error(line.to_string());
        }
        return ParsedLine::Sample(Sample {
            trace: fields[0].to_string(),
            timestamp_micros: (secs * 1e6) as i64,
            value,
        });
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [value] => match value.parse::<f64>() {
            Ok(v) => ParsedLine::Sample(Sample {
                trace: default_trace.to_string(),
                timestamp_micros: now_micros,
                value: v,
            }),
            Err(_) => ParsedLine::Error(line.to_string()),
        },
        [trace, value] => match value.parse::<f64>() {
            Ok(v) => ParsedLine::Sample(Sample {
                trace: (*trace).to_string(),
                timestamp_micros: now_micros,
                value: v,
            }),
            Err(_) => ParsedLine::Error(line.to_string()),
        },
        _ => ParsedLine::Error(line.to_string()),
    }
}

/// Parse a whole chunk of text, pushing samples and counting errors.
pub fn parse_chunk(
    text: &str,
    default_trace: &str,
    now_micros: i64,
    out: &mut Vec<Sample>,
) -> usize {
    let mut errors = 0;
    for line in text.lines() {
        match parse_line(line, default_trace, now_micros) {
            ParsedLine::Sample(s) => out.push(s),
            ParsedLine::Skip => {}
            ParsedLine::Error(_) => errors += 1,
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_form_carries_its_own_timestamp() {
        let parsed = parse_line("ch1,12.500000,3.25", "x", 0);
        assert_eq!(
            parsed,
            ParsedLine::Sample(Sample {
                trace: "ch1".into(),
                timestamp_micros: 12_500_000,
                value: 3.25,
            })
        );
    }

    #[test]
    fn bare_forms_are_stamped_on_arrival() {
        assert_eq!(
            parse_line("1.5", "main", 99),
            ParsedLine::Sample(Sample {
                trace: "main".into(),
                timestamp_micros: 99,
                value: 1.5,
            })
        );
        assert_eq!(
            parse_line("temp 21.3", "main", 99),
            ParsedLine::Sample(Sample {
                trace: "temp".into(),
                timestamp_micros: 99,
                value: 21.3,
            })
        );
    }

    #[test]
    fn comments_and_blanks_skip_and_junk_errors() {
        assert_eq!(parse_line("# header", "x", 0), ParsedLine::Skip);
        assert_eq!(parse_line("   ", "x", 0), ParsedLine::Skip);
        assert!(matches!(
            parse_line("not a number", "x", 0),
            ParsedLine::Error(_)
        ));
        assert!(matches!(
            parse_line("ch1,nan,1.0", "x", 0),
            ParsedLine::Error(_)
        ));
        assert!(matches!(parse_line("a,b,c,d", "x", 0), ParsedLine::Error(_)));
    }

    #[test]
    fn chunk_counts_errors_and_keeps_good_lines() {
        let mut out = Vec::new();
        let errors = parse_chunk("1.0\nbogus\n# note\n2.0\n", "t", 5, &mut out);
        assert_eq!(errors, 1);
        assert_eq!(out.len(), 2);
    }
}
