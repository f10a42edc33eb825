use liquid_core::Expression;
use liquid_core::Result as LiquidResult;
use liquid_core::Runtime;
use liquid_core::{Display_filter, Filter, FilterParameters, FilterReflection, FromFilterParameters, ParseFilter};
use liquid_core::{Value, ValueView};

use crate::images::responsive::{responsive_image, ResponsiveImageOptions};

#[derive(Debug, FilterParameters)]
struct ResponsiveImageArgs {
    #[parameter(description = "Alternative text for the image.", arg_type = "str")]
    alt: Option<Expression>,

    #[parameter(description = "Intrinsic width in pixels.", arg_type = "integer")]
    width: Option<Expression>,

    #[parameter(description = "Intrinsic height in pixels.", arg_type = "integer")]
    height: Option<Expression>,

    #[parameter(description = "CSS class names.", arg_type = "str", mode = "keyword")]
    class: Option<Expression>,

    #[parameter(description = "Value of the sizes attribute.", arg_type = "str", mode = "keyword")]
    sizes: Option<Expression>,

    #[parameter(description = "Lazy-load the image. Defaults to true.", arg_type = "bool", mode = "keyword")]
    lazy: Option<Expression>,
}

#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "responsive_image",
    description = "Wraps an image path in a <picture> element with a WebP source.",
    parameters(ResponsiveImageArgs),
    parsed(ResponsiveImageFilter)
)]
pub struct ResponsiveImage;

#[derive(Debug, FromFilterParameters, Display_filter)]
#[name = "responsive_image"]
struct ResponsiveImageFilter {
    #[parameters]
    args: ResponsiveImageArgs,
}

fn dimension(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok()).filter(|v| *v > 0)
}

impl Filter for ResponsiveImageFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let args = self.args.evaluate(runtime)?;
        let src = input.to_kstr().to_string();

        let options = ResponsiveImageOptions {
            alt: args.alt.map(|a| a.to_string()).unwrap_or_default(),
            width: dimension(args.width),
            height: dimension(args.height),
            sizes: args.sizes.map(|s| s.to_string()),
            class_name: args.class.map(|c| c.to_string()),
            lazy: args.lazy.unwrap_or(true),
        };

        Ok(Value::scalar(responsive_image(&src, &options)))
    }
}
