use crate::config::CrawlConfig;
use crate::url::is_valid_scheme;
use crate::ArgsError;
use std::time::Duration;

/// Outcome of a successful argument scan
#[derive(Debug)]
pub struct ParsedArgs {
    /// Crawl settings assembled from the flags
    pub config: CrawlConfig,

    /// Seed URLs in the order they were given
    pub urls: Vec<String>,

    /// Recoverable problems found while scanning, for the caller to report
    pub warnings: Vec<String>,
}

/// Scans command-line arguments into a [`ParsedArgs`]
///
/// Flags and URLs may interleave. A token starting with `-` is a flag,
/// named by its first character after the dash. `-n` and `-w` consume the
/// following token when it parses as a number; a missing or non-numeric
/// parameter produces a warning and leaves the flag unset, with a
/// non-numeric token staying in place to be scanned on its own. Unknown
/// flags warn and are ignored. A bare number that no flag consumed is
/// skipped. Every remaining token must be an http(s) URL.
///
/// # Arguments
///
/// * `args` - The argument tokens, without the program name
///
/// # Returns
///
/// * `Ok(ParsedArgs)` - Settings, seed URLs, and any warnings
/// * `Err(ArgsError)` - A seed URL failed scheme validation, or no URL
///   was supplied and `-h` was not
pub fn parse_args(args: &[String]) -> Result<ParsedArgs, ArgsError> {
    let mut config = CrawlConfig::default();
    let mut urls = Vec::new();
    let mut warnings = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if let Some(flag) = flag_name(arg) {
            match flag {
                'r' => config.recursive = true,
                'h' => config.help = true,
                'n' => match args.get(i + 1).map(|param| param.parse::<u32>()) {
                    Some(Ok(limit)) => {
                        config.page_limit = Some(limit);
                        i += 1;
                    }
                    Some(Err(_)) => warnings.push(non_numeric_warning("-n")),
                    None => warnings.push(missing_parameter_warning("-n")),
                },
                'w' => match args.get(i + 1).map(|param| parse_wait(param)) {
                    Some(Some(wait)) => {
                        config.wait = wait;
                        i += 1;
                    }
                    Some(None) => warnings.push(non_numeric_warning("-w")),
                    None => warnings.push(missing_parameter_warning("-w")),
                },
                other => warnings.push(format!(
                    "unsupported flag \"-{other}\", use \"-h\" for the list of options"
                )),
            }
        } else if is_bare_number(arg) {
            // A bare number is never a URL
            tracing::debug!(argument = arg.as_str(), "ignoring bare numeric argument");
        } else if is_valid_scheme(arg) {
            urls.push(arg.clone());
        } else {
            return Err(ArgsError::InvalidScheme(arg.clone()));
        }
        i += 1;
    }

    if urls.is_empty() && !config.help {
        return Err(ArgsError::NoUrls);
    }

    Ok(ParsedArgs {
        config,
        urls,
        warnings,
    })
}

/// First character after the dash names the flag; anything after it is
/// ignored, so `-rx` reads as `-r`
fn flag_name(arg: &str) -> Option<char> {
    arg.strip_prefix('-')?.chars().next()
}

fn is_bare_number(arg: &str) -> bool {
    arg.parse::<f64>().is_ok_and(|value| value.is_finite())
}

/// Accepts a non-negative finite number of seconds, fractions included
fn parse_wait(param: &str) -> Option<Duration> {
    let seconds = param.parse::<f64>().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

fn missing_parameter_warning(flag: &str) -> String {
    format!("missing parameter for the \"{flag}\" argument, use \"-h\" for more information")
}

fn non_numeric_warning(flag: &str) -> String {
    format!("use a numeric value for the \"{flag}\" argument")
}
