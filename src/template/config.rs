//! Template configuration and its validation.

use super::error::Error;
use super::output::Output;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
}

impl Format {
    pub const SUPPORTED: &'static [&'static str] = &["yaml"];
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(Format::Yaml),
            _ => Err(format!(
                "unsupported format '{}': expected one of {}",
                s,
                Format::SUPPORTED.join(", ")
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

/// Template settings as provided by the user, before validation.
#[derive(Debug, Clone)]
pub struct Config {
    pub delimiter: String,
    pub filter: Option<String>,
    pub format: String,
    pub outfile: Option<PathBuf>,
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: "/".to_string(),
            filter: None,
            format: "yaml".to_string(),
            outfile: None,
            prefix: "/".to_string(),
        }
    }
}

impl Config {
    /// List every rule this configuration breaks. Empty when valid.
    ///
    /// The filter expression is not compiled here; see [`Config::validate`].
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.delimiter.is_empty() {
            violations.push("delimiter is required".to_string());
        }
        if self.prefix.is_empty() {
            violations.push("prefix is required".to_string());
        }
        if let Err(e) = self.format.parse::<Format>() {
            violations.push(e);
        }
        violations
    }

    /// Check the configuration and build the immutable [`Template`].
    pub fn validate(self) -> Result<Template, Error> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }
        let format = self.format.parse::<Format>()?;

        let filter = match self.filter.as_deref() {
            Some(expr) if !expr.is_empty() => {
                let filter = Regex::new(expr).map_err(|e| {
                    log::error!("unable to compile filter expression {:?}", expr);
                    Error::from(e)
                })?;
                Some(filter)
            }
            _ => None,
        };

        Ok(Template {
            delimiter: self.delimiter,
            filter,
            format,
            output: Output::from_target(self.outfile.as_deref()),
            prefix: self.prefix,
        })
    }
}

/// A validated template, immutable for the duration of a render.
#[derive(Debug, Clone)]
pub struct Template {
    pub delimiter: String,
    pub filter: Option<Regex>,
    pub format: Format,
    pub output: Output,
    pub prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.violations().is_empty());
        let template = config.validate().unwrap();
        assert_eq!(template.format, Format::Yaml);
        assert_eq!(template.output, Output::Stdout);
        assert!(template.filter.is_none());
    }

    #[test]
    fn test_violations_are_all_reported() {
        let config = Config {
            delimiter: String::new(),
            prefix: String::new(),
            format: "toml".to_string(),
            ..Config::default()
        };
        let violations = config.violations();
        assert_eq!(violations.len(), 3);
        assert!(violations[2].contains("unsupported format 'toml'"));
        match config.validate() {
            Err(Error::Validation(v)) => assert_eq!(v, violations),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_filter_is_compiled() {
        let config = Config {
            filter: Some("^db/".to_string()),
            ..Config::default()
        };
        let template = config.validate().unwrap();
        let filter = template.filter.unwrap();
        assert!(filter.is_match("db/host"));
        assert!(!filter.is_match("cache/ttl"));
    }

    #[test]
    fn test_empty_filter_means_none() {
        let config = Config {
            filter: Some(String::new()),
            ..Config::default()
        };
        assert!(config.validate().unwrap().filter.is_none());
    }

    #[test]
    fn test_bad_filter_fails_compile() {
        let config = Config {
            filter: Some("db/(".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::FilterCompile(_))));
    }

    #[test]
    fn test_outfile_selects_file_output() {
        let config = Config {
            outfile: Some(PathBuf::from("/tmp/app.tmpl")),
            ..Config::default()
        };
        assert_eq!(
            config.validate().unwrap().output,
            Output::File(PathBuf::from("/tmp/app.tmpl"))
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert!("json".parse::<Format>().is_err());
        assert_eq!(Format::Yaml.to_string(), "yaml");
    }
}
