//! Named color table

use crate::material::Material;

pub const RED: Material = Material::phong(0xff0000);
pub const GREEN: Material = Material::phong(0x00ff00);
pub const BLUE: Material = Material::phong(0x0000ff);
pub const YELLOW: Material = Material::phong(0xffff00);
pub const MAGENTA: Material = Material::phong(0xff00ff);
pub const CYAN: Material = Material::phong(0x00ffff);
pub const WHITE: Material = Material::phong(0xffffff);
/// Fallback for unsupported color specs
pub const BLACK: Material = Material::phong(0x000000);
pub const GREY: Material = Material::phong(0x808080);
pub const LIGHTGREY: Material = Material::phong(0xd3d3d3);
pub const ORANGE: Material = Material::phong(0xffa500);
pub const PURPLE: Material = Material::phong(0x800080);
pub const PINK: Material = Material::phong(0xffc0cb);
pub const BROWN: Material = Material::phong(0xa52a2a);
pub const BEIGE: Material = Material::phong(0xf5f5dc);
pub const DARKGREEN: Material = Material::phong(0x006400);
pub const NAVY: Material = Material::phong(0x000080);

/// Color name to material table
pub const COLORMAP: &[(&str, Material)] = &[
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("magenta", MAGENTA),
    ("cyan", CYAN),
    ("white", WHITE),
    ("black", BLACK),
    ("grey", GREY),
    ("lightgrey", LIGHTGREY),
    ("orange", ORANGE),
    ("purple", PURPLE),
    ("pink", PINK),
    ("brown", BROWN),
    ("beige", BEIGE),
    ("darkgreen", DARKGREEN),
    ("navy", NAVY),
];

/// Look up a material by color name
pub fn named_color(name: &str) -> Option<Material> {
    COLORMAP
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, material)| *material)
}

/// All names in the color table
pub fn color_names() -> impl Iterator<Item = &'static str> {
    COLORMAP.iter().map(|(name, _)| *name)
}

/// Pack float RGB in [0, 1] into 0xRRGGBB
pub fn rgb_to_int(r: f32, g: f32, b: f32) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Float RGB in [0, 1] from packed 0xRRGGBB
pub fn int_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    ]
}
