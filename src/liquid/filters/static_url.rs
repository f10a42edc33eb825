use std::fmt;
use liquid_core::{Runtime, ValueView, Value, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParseFilter, ParameterReflection};
use liquid_core::FilterReflection;

/// URL prefix static assets are served under
pub const STATIC_PREFIX: &str = "/static";

/// Map an asset path to its public URL, e.g. `img/logo.png` -> `/static/img/logo.png`
pub fn static_url(path: &str) -> String {
    let path = path.trim_start_matches('/');
    let path = path.strip_prefix("static/").unwrap_or(path);
    format!("{}/{}", STATIC_PREFIX, path)
}

/// StaticUrl filter implementation
#[derive(Debug, Clone)]
pub struct StaticUrlFilter;

impl liquid_core::Filter for StaticUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        Ok(Value::scalar(static_url(input.to_kstr().as_str())))
    }
}

impl fmt::Display for StaticUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "static_url")
    }
}

/// Parse filter factory for static_url
#[derive(Debug, Clone)]
pub struct StaticUrlFilterParser;

impl FilterReflection for StaticUrlFilterParser {
    fn name(&self) -> &str {
        "static_url"
    }

    fn description(&self) -> &str {
        "Prefixes an asset path with the static files location"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for StaticUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(StaticUrlFilter))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
