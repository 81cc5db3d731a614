use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::constants;
use crate::error::AppError;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// College Football Data Pipeline
///
/// Pulls games, ratings, win probabilities, betting lines, poll rankings and
/// broadcast info from the CollegeFootballData API across a range of seasons,
/// filters everything to top-division (FBS) teams, and writes one CSV per
/// dataset. A second phase flattens the nested poll rankings and left-joins
/// the datasets into one weekly game-level table.
///
/// The API bearer token is read from the CFBD_API_KEY environment variable
/// (a .env file in the working directory is honored).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// First season to pull, inclusive.
    #[arg(long = "start-year", default_value_t = constants::DEFAULT_START_YEAR, help_heading = "Pipeline")]
    pub start_year: i32,

    /// Last season to pull, inclusive.
    #[arg(long = "end-year", default_value_t = constants::DEFAULT_END_YEAR, help_heading = "Pipeline")]
    pub end_year: i32,

    /// Directory for CSV output. Overrides the config file value.
    #[arg(long = "data-dir", help_heading = "Pipeline")]
    pub data_dir: Option<String>,

    /// Only run the fetch phase: pull and write the per-dataset CSVs,
    /// skip flattening and merging.
    #[arg(long = "fetch-only", help_heading = "Pipeline")]
    pub fetch_only: bool,

    /// Only run the merge phase: read previously written CSVs, flatten the
    /// rankings and write the merged weekly game table. No network access.
    #[arg(long = "merge-only", help_heading = "Pipeline")]
    pub merge_only: bool,

    /// Update API domain in config.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN"
    )]
    pub new_api_domain: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug logging on stdout.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs are written to
    /// the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// Validates argument combinations before the pipeline starts.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.fetch_only && self.merge_only {
            return Err(AppError::config_error(
                "Cannot use both --fetch-only and --merge-only simultaneously",
            ));
        }
        if self.start_year > self.end_year {
            return Err(AppError::config_error(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            start_year: 2010,
            end_year: 2024,
            data_dir: None,
            fetch_only: false,
            merge_only: false,
            new_api_domain: None,
            list_config: false,
            debug: false,
            log_file: None,
        }
    }

    #[test]
    fn test_default_year_range() {
        let args = Args::parse_from(["cfbd-pipeline"]);
        assert_eq!(args.start_year, 2010);
        assert_eq!(args.end_year, 2024);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_conflicting_phases_rejected() {
        let args = Args {
            fetch_only: true,
            merge_only: true,
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let args = Args {
            start_year: 2024,
            end_year: 2010,
            ..base_args()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_single_season_range_allowed() {
        let args = Args {
            start_year: 2020,
            end_year: 2020,
            ..base_args()
        };
        assert!(args.validate().is_ok());
    }
}
