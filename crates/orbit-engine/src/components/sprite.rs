/// How the host draws a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStyle {
    /// Textured disc (texture index selects the image).
    #[default]
    Sprite,
    /// Stroked circle with no fill, for fixed scenery such as rings.
    Outline,
}

impl DrawStyle {
    /// Wire value written into `BodyInstance::outline`.
    pub fn as_f32(self) -> f32 {
        match self {
            DrawStyle::Sprite => 0.0,
            DrawStyle::Outline => 1.0,
        }
    }
}

/// How an entity appears on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Game-defined texture index.
    pub texture: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Sprite or outline rendering.
    pub style: DrawStyle,
    /// Game-defined classification, forwarded untouched to the host.
    pub role: f32,
}

impl SpriteComponent {
    pub fn textured(texture: f32) -> Self {
        Self {
            texture,
            ..Default::default()
        }
    }

    pub fn outline() -> Self {
        Self {
            style: DrawStyle::Outline,
            ..Default::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_role(mut self, role: f32) -> Self {
        self.role = role;
        self
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            texture: 0.0,
            alpha: 1.0,
            style: DrawStyle::Sprite,
            role: 0.0,
        }
    }
}
