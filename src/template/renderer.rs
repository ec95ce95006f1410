//! Render coordination: source → filter → engine → output.

use super::config::{Config, Template};
use super::error::Error;
use super::filter::KeyFilter;
use crate::backend::{KeySource, Query};
use crate::engine::Engine;

/// Coordinates a template render from a validated configuration.
pub struct Renderer {
    template: Template,
}

impl Renderer {
    /// Validate `config` and compile its filter. Nothing is read or written
    /// yet.
    pub fn new(config: Config) -> Result<Self, Error> {
        log::debug!("validating template configuration");
        let template = config.validate()?;
        Ok(Self { template })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Stream keys from `backend` through the filter into `engine`.
    ///
    /// Returns the first error from any stage. On error the producer is
    /// stopped before returning.
    pub fn render(&self, backend: &dyn KeySource, engine: &dyn Engine) -> Result<(), Error> {
        let query = Query::new(self.template.prefix.as_str());
        log::debug!(
            "streaming keys under {} as {} to {}",
            query.prefix,
            self.template.format,
            self.template.output
        );
        let stream = backend.keys(&query);
        let mut keys = KeyFilter::new(stream, &self.template);

        let result = engine.render(&mut keys, &self.template.output);
        keys.into_inner().close();
        match &result {
            Ok(()) => log::debug!("template rendered to {}", self.template.output),
            Err(e) => log::error!("error rendering template: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::StaticSource;
    use crate::engine::yaml::YamlEngine;
    use crate::template::Format;
    use indoc::indoc;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn render(source: StaticSource, outfile: PathBuf, prefix: &str) -> Result<(), Error> {
        let config = Config {
            prefix: prefix.to_string(),
            outfile: Some(outfile),
            ..Config::default()
        };
        Renderer::new(config)
            .unwrap()
            .render(&source, &YamlEngine::new(false))
    }

    #[test]
    fn test_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("app.tmpl");
        let source = StaticSource::new(&[
            ("/cfg/db/host", "localhost"),
            ("/cfg/feature/enabled", "true"),
            ("/cfg/db/port", "5432"),
            ("/other/ignored", "x"),
        ]);
        render(source, out.clone(), "/cfg/").unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            indoc! {r#"
                db:
                  host: "{{ getv "/cfg/db/host" }}"
                  port: {{ getv "/cfg/db/port" }}
                feature:
                  enabled: {{ getv "/cfg/feature/enabled" }}
            "#}
        );
    }

    #[test]
    fn test_stream_error_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("app.tmpl");
        let source = StaticSource::new(&[("/cfg/db/host", "localhost")]).then_fail("denied");
        let result = render(source, out.clone(), "/cfg/");
        assert!(matches!(result, Err(Error::Backend(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_conflict_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("app.tmpl");
        let source = StaticSource::new(&[("/a/b", "1"), ("/a", "2")]);
        let result = render(source, out.clone(), "/");
        match result {
            Err(Error::ConflictingKeyShape {
                existing, incoming, ..
            }) => {
                assert_eq!(existing, "/a/b");
                assert_eq!(incoming, "/a");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            format: "json".to_string(),
            ..Config::default()
        };
        assert!(matches!(Renderer::new(config), Err(Error::Validation(_))));
    }

    #[test]
    fn test_template_exposes_validated_format() {
        let config = Config {
            filter: Some("^db/".to_string()),
            ..Config::default()
        };
        let renderer = Renderer::new(config).unwrap();
        assert_eq!(renderer.template().format, Format::Yaml);
        assert!(renderer.template().filter.is_some());
    }

    #[test]
    fn test_empty_backend_writes_empty_document() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("app.tmpl");
        render(StaticSource::new(&[]), out.clone(), "/").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn test_filter_applies_to_stripped_name() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("app.tmpl");
        let config = Config {
            prefix: "/app/".to_string(),
            filter: Some("^db/".to_string()),
            outfile: Some(out.clone()),
            ..Config::default()
        };
        let source = StaticSource::new(&[("/app/cache/ttl", "60"), ("/app/db/host", "h")]);
        Renderer::new(config)
            .unwrap()
            .render(&source, &YamlEngine::new(true))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "db:\n  host: \"{{ getv \"/app/db/host\" \"null\" }}\"\n"
        );
    }
}
