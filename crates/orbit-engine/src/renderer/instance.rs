use bytemuck::{Pod, Zeroable};

/// Per-body draw record handed to the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Radius in world units.
    pub radius: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Game-defined texture index.
    pub texture: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// 1.0 for outlined circles, 0.0 for textured ones.
    pub outline: f32,
    /// Game-defined classification.
    pub role: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Draw list for one frame.
pub struct DrawBuffer {
    /// Outlined instances first, then textured instances from `outline_split` on.
    pub instances: Vec<BodyInstance>,
    /// Index of the first textured instance.
    pub outline_split: u32,
    capacity: usize,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// A buffer that never holds more than `capacity` instances.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            outline_split: 0,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.outline_split = 0;
    }

    /// Append an instance. Returns `false` when the buffer is full.
    pub fn push(&mut self, instance: BodyInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn set_outline_split(&mut self, split: u32) {
        self.outline_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(BodyInstance::FLOATS, 8);
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = DrawBuffer::with_capacity(2);
        assert!(buf.push(BodyInstance::default()));
        assert!(buf.push(BodyInstance::default()));
        assert!(!buf.push(BodyInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn floats_follow_field_order() {
        let mut buf = DrawBuffer::with_capacity(4);
        buf.push(BodyInstance {
            x: 1.0,
            y: 2.0,
            radius: 3.0,
            rotation: 4.0,
            texture: 5.0,
            alpha: 6.0,
            outline: 7.0,
            role: 8.0,
        });
        assert_eq!(buf.as_floats(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
