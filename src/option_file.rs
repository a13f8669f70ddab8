//! Option files list integer parameters of the solver under test, one per line:
//!
//! ```text
//! # name default min max
//! restartint 100 1 10000
//! ```
//!
//! Every option is either kept at its default or replaced by a random value in its range, and
//! the outcome is written into the formula as an annotation.
use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;

use crate::basic_types::Random;
use crate::result::OptionFileError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub default: i32,
    pub min: i32,
    pub max: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuzzedOption {
    pub name: String,
    pub value: i32,
}

impl Display for FuzzedOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "--{}={}", self.name, self.value)
    }
}

/// Parses the contents of an option file. Blank lines and lines starting with `#` are skipped.
pub fn parse_option_file(contents: &str) -> Result<Vec<OptionSpec>, OptionFileError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| parse_line(line_number, line))
        .collect()
}

fn parse_line(line_number: usize, line: &str) -> Result<OptionSpec, OptionFileError> {
    let malformed = || OptionFileError::Malformed {
        line: line_number,
        content: line.to_owned(),
    };

    let fields = line.split_whitespace().collect::<Vec<_>>();
    let [name, default, min, max] = fields.as_slice() else {
        return Err(malformed());
    };

    let parse = |field: &str| field.parse::<i32>().map_err(|_| malformed());
    let spec = OptionSpec {
        name: (*name).to_owned(),
        default: parse(*default)?,
        min: parse(*min)?,
        max: parse(*max)?,
    };

    if spec.min > spec.max || !(spec.min..=spec.max).contains(&spec.default) {
        return Err(OptionFileError::InvalidRange {
            line: line_number,
            name: spec.name,
            default: spec.default,
            min: spec.min,
            max: spec.max,
        });
    }

    Ok(spec)
}

/// Keeps each option at its default with probability 1/2 and otherwise draws a value
/// uniformly from its range.
pub fn fuzz_options(specs: &[OptionSpec], rng: &mut impl Random) -> Vec<FuzzedOption> {
    specs
        .iter()
        .map(|spec| {
            let value = if rng.flip_coin() {
                spec.default
            } else {
                let span = spec.max.abs_diff(spec.min);
                let offset = rng.generate_u32_in_range(0, span);
                spec.min.wrapping_add_unsigned(offset)
            };

            debug!("Option {} fuzzed to {value}", spec.name);

            FuzzedOption {
                name: spec.name.clone(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fuzz_options;
    use super::parse_option_file;
    use super::FuzzedOption;
    use super::OptionSpec;
    use crate::basic_types::tests::TestRandom;
    use crate::result::OptionFileError;

    fn spec(name: &str, default: i32, min: i32, max: i32) -> OptionSpec {
        OptionSpec {
            name: name.to_owned(),
            default,
            min,
            max,
        }
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let contents = "# name default min max\n\nrestartint 100 1 10000\n  phase 1 -1 1  \n";

        let specs = parse_option_file(contents).expect("valid option file");

        assert_eq!(specs, vec![spec("restartint", 100, 1, 10000), spec("phase", 1, -1, 1)]);
    }

    #[test]
    fn missing_fields_are_reported_with_their_line() {
        let result = parse_option_file("a 1 0 2\nb 1 0\n");

        assert_eq!(
            result,
            Err(OptionFileError::Malformed {
                line: 2,
                content: "b 1 0".to_owned()
            })
        );
    }

    #[test]
    fn default_outside_range_is_rejected() {
        let result = parse_option_file("verbose 5 0 1\n");

        assert!(matches!(result, Err(OptionFileError::InvalidRange { line: 1, .. })));
    }

    #[test]
    fn non_numeric_values_are_malformed() {
        assert!(matches!(
            parse_option_file("seed x 0 1"),
            Err(OptionFileError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn fuzzing_keeps_or_redraws_each_option() {
        let specs = vec![spec("a", 3, 0, 10), spec("b", 0, -5, 5), spec("c", 7, 7, 7)];
        let mut rng = TestRandom::with_integers([
            1, // keep a
            0, 2, // b = -5 + 2
            0, 0, // c has a single value
        ]);

        let fuzzed = fuzz_options(&specs, &mut rng);

        assert_eq!(
            fuzzed,
            vec![
                FuzzedOption { name: "a".to_owned(), value: 3 },
                FuzzedOption { name: "b".to_owned(), value: -3 },
                FuzzedOption { name: "c".to_owned(), value: 7 },
            ]
        );
        assert_eq!(fuzzed[1].to_string(), "--b=-3");
        assert!(rng.is_exhausted());
    }
}
