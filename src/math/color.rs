use glam::Vec3;

/// Ambient term so unlit hemispheres stay visible
const AMBIENT: f32 = 0.25;

/// Lambert shading of `base` for a surface `normal` lit from `to_light`
pub fn shade(base: [f32; 3], normal: Vec3, to_light: Vec3) -> [f32; 3] {
    let diffuse = normal.normalize_or_zero().dot(to_light.normalize_or_zero()).max(0.0);
    let k = AMBIENT + (1.0 - AMBIENT) * diffuse;
    [base[0] * k, base[1] * k, base[2] * k]
}

/// Linear `[0, 1]` colour to opaque RGBA8
pub fn to_rgba8(color: [f32; 3]) -> [u8; 4] {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [byte(color[0]), byte(color[1]), byte(color[2]), 255]
}

/// Packed `0xRRGGBB` to linear `[0, 1]`
pub fn from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
