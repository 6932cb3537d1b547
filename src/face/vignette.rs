use crate::face::config::VignetteConfig;
use crate::foundation::core::{Canvas, Circle};
use crate::render::surface::{
    BlendMode, FillStyle, GradientExtend, GradientStop, RadialGradient, Shader, Surface,
};

/// Stops at `0`, `progress * mid_stop` and `progress`, colored inner, mid and outer.
pub fn gradient_stops(vignette: &VignetteConfig, progress: f64) -> [GradientStop; 3] {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0) as f32
    };
    [
        GradientStop {
            offset: 0.0,
            color: vignette.inner,
        },
        GradientStop {
            offset: p * vignette.mid_stop,
            color: vignette.mid,
        },
        GradientStop {
            offset: p,
            color: vignette.outer,
        },
    ]
}

/// Multiplies the whole frame with a mirrored radial gradient inscribed in the canvas.
#[derive(Clone, Debug)]
pub struct VignetteCompositor {
    vignette: VignetteConfig,
    style: FillStyle,
}

impl VignetteCompositor {
    /// Build the compositor; the fill style is kept and only its shader changes per frame.
    pub fn new(vignette: &VignetteConfig) -> Self {
        Self {
            vignette: vignette.clone(),
            style: FillStyle {
                shader: Shader::Solid(vignette.outer),
                blend: BlendMode::Multiply,
            },
        }
    }

    /// Fill style as of the last [`VignetteCompositor::draw`].
    pub fn style(&self) -> &FillStyle {
        &self.style
    }

    /// Rebuild the gradient for `progress` and multiply it over the frame.
    pub fn draw(&mut self, surface: &mut dyn Surface, canvas: Canvas, progress: f64) {
        let center = canvas.center();
        let radius = canvas.width_f64() / 2.0;
        let stops = gradient_stops(&self.vignette, progress);

        match &mut self.style.shader {
            Shader::Radial(gradient) => {
                gradient.center = center;
                gradient.radius = radius;
                gradient.stops.clear();
                gradient.stops.extend_from_slice(&stops);
            }
            shader => {
                *shader = Shader::Radial(RadialGradient {
                    center,
                    radius,
                    stops: stops.to_vec(),
                    extend: GradientExtend::Mirror,
                });
            }
        }

        surface.fill_circle(Circle::new(center, radius), &self.style);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/vignette.rs"]
mod tests;
