//! Declarative line paint for region layers.
//!
//! Values are either constants or linear ramps over the zoom level or a
//! numeric feature property. They serialize to the MapLibre expression form
//! and can be evaluated locally, clamping at the outer stops like the
//! renderer does.

use crate::prelude::HashMap;
use serde_json::{json, Value};

/// Values that can be blended along an interpolation ramp
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

/// Scalars that can appear in a paint property
pub trait StyleScalar: Interpolatable + Clone + PartialEq + std::fmt::Debug {
    fn to_json(&self) -> Value;
}

impl StyleScalar for f64 {
    fn to_json(&self) -> Value {
        json!(self)
    }
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Interpolatable for Rgb {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (a as f64).lerp(&(b as f64), t).round().clamp(0.0, 255.0) as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl StyleScalar for Rgb {
    fn to_json(&self) -> Value {
        json!(self.to_hex())
    }
}

/// What an interpolation ramp is driven by
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    Zoom,
    Property(String),
}

impl StyleInput {
    fn to_json(&self) -> Value {
        match self {
            StyleInput::Zoom => json!(["zoom"]),
            StyleInput::Property(name) => json!(["get", name]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue<T: StyleScalar> {
    Constant(T),
    /// Linear ramp; stops are kept sorted by input value
    Interpolate {
        input: StyleInput,
        stops: Vec<(f64, T)>,
    },
}

impl<T: StyleScalar> StyleValue<T> {
    pub fn constant(value: T) -> Self {
        StyleValue::Constant(value)
    }

    pub fn linear(input: StyleInput, mut stops: Vec<(f64, T)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        StyleValue::Interpolate { input, stops }
    }

    /// Evaluates the value for a zoom level and a feature's properties.
    ///
    /// Returns `None` when a ramp has no stops or its driving property is
    /// missing or not numeric.
    pub fn evaluate(&self, zoom: f64, properties: &HashMap<String, Value>) -> Option<T> {
        match self {
            StyleValue::Constant(value) => Some(value.clone()),
            StyleValue::Interpolate { input, stops } => {
                let x = match input {
                    StyleInput::Zoom => zoom,
                    StyleInput::Property(name) => properties.get(name)?.as_f64()?,
                };
                interpolate(stops, x)
            }
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            StyleValue::Constant(value) => value.to_json(),
            StyleValue::Interpolate { input, stops } => {
                let mut expr = vec![json!("interpolate"), json!(["linear"]), input.to_json()];
                for (stop, value) in stops {
                    expr.push(json!(stop));
                    expr.push(value.to_json());
                }
                Value::Array(expr)
            }
        }
    }
}

fn interpolate<T: StyleScalar>(stops: &[(f64, T)], x: f64) -> Option<T> {
    let (first, last) = (stops.first()?, stops.last()?);
    if x <= first.0 {
        return Some(first.1.clone());
    }
    if x >= last.0 {
        return Some(last.1.clone());
    }
    stops.windows(2).find_map(|pair| {
        let ((x0, v0), (x1, v1)) = (&pair[0], &pair[1]);
        if x >= *x0 && x <= *x1 {
            let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
            Some(v0.lerp(v1, t))
        } else {
            None
        }
    })
}

/// Paint of a `line` layer
#[derive(Debug, Clone, PartialEq)]
pub struct LinePaint {
    pub color: StyleValue<Rgb>,
    pub width: StyleValue<f64>,
    pub opacity: Option<StyleValue<f64>>,
}

impl LinePaint {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color: StyleValue::constant(color),
            width: StyleValue::constant(width),
            opacity: None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut paint = serde_json::Map::new();
        paint.insert("line-color".to_string(), self.color.to_json());
        paint.insert("line-width".to_string(), self.width.to_json());
        if let Some(opacity) = &self.opacity {
            paint.insert("line-opacity".to_string(), opacity.to_json());
        }
        Value::Object(paint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(count: f64) -> HashMap<String, Value> {
        let mut map = HashMap::default();
        map.insert("intersection_count".to_string(), json!(count));
        map
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Rgb::new(0, 102, 0).to_hex(), "#006600");
        assert_eq!(Rgb::new(255, 0, 170).to_hex(), "#ff00aa");
    }

    #[test]
    fn test_zoom_ramp_clamps_and_interpolates() {
        let width = StyleValue::linear(
            StyleInput::Zoom,
            vec![(10.0, 2.0), (5.0, 0.5), (15.0, 6.0)],
        );
        let none = HashMap::default();

        assert_eq!(width.evaluate(3.0, &none), Some(0.5));
        assert_eq!(width.evaluate(10.0, &none), Some(2.0));
        assert_eq!(width.evaluate(12.5, &none), Some(4.0));
        assert_eq!(width.evaluate(20.0, &none), Some(6.0));
    }

    #[test]
    fn test_property_ramp_colour() {
        let color = StyleValue::linear(
            StyleInput::Property("intersection_count".to_string()),
            vec![
                (1.0, Rgb::new(0, 255, 0)),
                (50.0, Rgb::new(255, 255, 0)),
                (100.0, Rgb::new(255, 0, 0)),
            ],
        );

        assert_eq!(color.evaluate(0.0, &props(1.0)), Some(Rgb::new(0, 255, 0)));
        assert_eq!(color.evaluate(0.0, &props(100.0)), Some(Rgb::new(255, 0, 0)));
        assert_eq!(color.evaluate(0.0, &props(75.0)), Some(Rgb::new(255, 128, 0)));
        assert_eq!(color.evaluate(0.0, &HashMap::default()), None);
    }

    #[test]
    fn test_expression_json() {
        let opacity = StyleValue::linear(StyleInput::Zoom, vec![(5.0, 0.3), (15.0, 1.0)]);
        assert_eq!(
            opacity.to_json(),
            json!(["interpolate", ["linear"], ["zoom"], 5.0, 0.3, 15.0, 1.0])
        );

        let paint = LinePaint::solid(Rgb::new(255, 102, 0), 3.0);
        assert_eq!(
            paint.to_json(),
            json!({"line-color": "#ff6600", "line-width": 3.0})
        );
    }
}
