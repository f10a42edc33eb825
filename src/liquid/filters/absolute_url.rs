use std::fmt;
use liquid_core::{Runtime, ValueView, Value, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParseFilter, ParameterReflection};
use liquid_core::FilterReflection;

/// Join a site URL and a path with exactly one slash between them
pub fn absolute_url(site_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let mut rel = format!("/{}", path.trim_start_matches('/'));
    while rel.contains("//") {
        rel = rel.replace("//", "/");
    }

    format!("{}{}", site_url.trim_end_matches('/'), rel)
}

/// AbsoluteUrl filter implementation
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilter {
    site_url: String,
}

impl liquid_core::Filter for AbsoluteUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let path = input.to_kstr().to_string();
        Ok(Value::scalar(absolute_url(&self.site_url, &path)))
    }
}

impl fmt::Display for AbsoluteUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absolute_url")
    }
}

/// Parse filter factory for absolute_url
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilterParser {
    pub site_url: String,
}

impl FilterReflection for AbsoluteUrlFilterParser {
    fn name(&self) -> &str {
        "absolute_url"
    }

    fn description(&self) -> &str {
        "Creates an absolute URL by prepending the site url to the input"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for AbsoluteUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(AbsoluteUrlFilter {
            site_url: self.site_url.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
