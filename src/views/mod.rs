use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Views the handlers can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    /// Cat list
    Page1,
    Page2,
    Page3,
    /// Dog list
    Page4,
    NotFound,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Home,
        View::Page1,
        View::Page2,
        View::Page3,
        View::Page4,
        View::NotFound,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            View::Home => "home.html",
            View::Page1 => "page1.html",
            View::Page2 => "page2.html",
            View::Page3 => "page3.html",
            View::Page4 => "page4.html",
            View::NotFound => "404.html",
        }
    }
}

const BUILTIN_TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("page1.html", include_str!("../../templates/page1.html")),
    ("page2.html", include_str!("../../templates/page2.html")),
    ("page3.html", include_str!("../../templates/page3.html")),
    ("page4.html", include_str!("../../templates/page4.html")),
    ("404.html", include_str!("../../templates/404.html")),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Template(#[from] minijinja::Error),
}

/// Template environment shared by all requests
pub struct ViewRenderer {
    env: Environment<'static>,
}

impl ViewRenderer {
    /// Load the built-in templates, replacing any that have a same-named
    /// file in `template_dir`.
    pub fn new(template_dir: Option<&Path>) -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)?;
        }

        if let Some(dir) = template_dir {
            for (name, _) in BUILTIN_TEMPLATES {
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                let source = fs::read_to_string(&path)
                    .map_err(|source| ViewError::Io { path: path.clone(), source })?;
                env.add_template_owned(name.to_string(), source)?;
                info!("Loaded template override {}", path.display());
            }
        }

        Ok(Self { env })
    }

    /// Built-in templates only
    pub fn builtin() -> Result<Self, ViewError> {
        Self::new(None)
    }

    pub fn render<S: Serialize>(&self, view: View, context: S) -> Result<String, ViewError> {
        let template = self.env.get_template(view.template_name())?;
        Ok(template.render(context)?)
    }
}
