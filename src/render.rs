//! Report Rendering - Template Contract
//!
//! The template sees exactly three names: `project`, `manifestos`, `themes`.
//! Undefined values follow Jinja2 semantics: printing one yields nothing,
//! reaching into one is an error. Python-style methods such as
//! `themes.items()` and `m.title.upper()` are available.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ProjectConfig, ThemeConfig};
use crate::loader::ManifestoRecord;

#[derive(Debug, Error)]
#[error("Template render failed: {0}")]
pub struct RenderError(#[from] minijinja::Error);

#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub project: &'a ProjectConfig,
    pub manifestos: &'a [ManifestoRecord],
    pub themes: &'a ThemeConfig,
}

pub fn render(
    project: &ProjectConfig,
    records: &[ManifestoRecord],
    themes: &ThemeConfig,
    template_text: &str,
) -> Result<String, RenderError> {
    let mut env = Environment::new();
    env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);
    let template = env.template_from_str(template_text)?;

    let context = RenderContext {
        project,
        manifestos: records,
        themes,
    };

    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ManifestoMetadata;

    fn records() -> Vec<ManifestoRecord> {
        vec![ManifestoRecord {
            path: "manifestos/Manifesto-Quiet.md".into(),
            metadata: ManifestoMetadata {
                title: "Quiet".to_string(),
                tagline: "Less noise".to_string(),
                version: "1.0.0".to_string(),
                theme: "rebel".to_string(),
                description: "On silence.".to_string(),
            },
        }]
    }

    #[test]
    fn test_context_names_exposed() {
        let project = ProjectConfig::from_yaml_str("name: Demo").unwrap();
        let themes = ThemeConfig::from_yaml_str("rebel:\n  name: Rebels\n  icon: R").unwrap();
        let template = "# {{ project.name }}\n\
            {% for m in manifestos %}{{ themes[m.theme].icon }} [{{ m.title }}]({{ m.path }}) v{{ m.version }}{% endfor %}";

        let out = render(&project, &records(), &themes, template).unwrap();
        assert_eq!(out, "# Demo\nR [Quiet](manifestos/Manifesto-Quiet.md) v1.0.0");
    }

    #[test]
    fn test_fallback_for_undeclared_theme() {
        let template = "{% for m in manifestos %}\
            {% if m.theme in themes %}{{ themes[m.theme].name }}{% else %}{{ m.theme }}{% endif %}\
            {% endfor %}";

        let out = render(&ProjectConfig::default(), &records(), &ThemeConfig::default(), template).unwrap();
        assert_eq!(out, "rebel");
    }

    #[test]
    fn test_python_style_methods() {
        let themes = ThemeConfig::from_yaml_str(
            "rebel:\n  name: Rebels\n  icon: R\nclassic:\n  name: Classics\n",
        )
        .unwrap();
        let template = "{% for key, theme in themes.items() %}{{ key }}={{ theme.name }};{% endfor %}\
            {{ themes.get('rebel').icon }} {{ manifestos[0].title.upper() }}";

        let out = render(&ProjectConfig::default(), &records(), &themes, template).unwrap();
        assert_eq!(out, "rebel=Rebels;classic=Classics;R QUIET");
    }

    #[test]
    fn test_trailing_newline_dropped() {
        let out = render(&ProjectConfig::default(), &[], &ThemeConfig::default(), "done\n").unwrap();
        assert_eq!(out, "done");
    }

    #[test]
    fn test_undefined_structure_fails() {
        let err = render(
            &ProjectConfig::default(),
            &records(),
            &ThemeConfig::default(),
            "{{ project.owner.name }}",
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_syntax_error_fails() {
        let err = render(&ProjectConfig::default(), &[], &ThemeConfig::default(), "{% for %}");
        assert!(err.unwrap_err().to_string().starts_with("Template render failed"));
    }
}
