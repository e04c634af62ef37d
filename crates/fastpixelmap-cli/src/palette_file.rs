//! Palette selection: built-in presets or plain-text palette files.

use fastpixelmap::{presets, Color, Palette};
use std::fs;
use std::path::Path;

/// Resolves a `--palette` argument: `watlington16`, `blend256` or a file path.
pub fn resolve(name: &str) -> Result<Palette, Box<dyn std::error::Error>> {
    match name {
        "watlington16" => Ok(presets::watlington16()),
        "blend256" => Ok(presets::watlington_blend256()),
        path => load(Path::new(path)),
    }
}

/// Reads a palette file with one color per line.
pub fn load(path: &Path) -> Result<Palette, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read palette '{}': {}", path.display(), e))?;
    let colors = parse(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), colors = colors.len(), "palette file loaded");
    Ok(Palette::new(colors)?)
}

/// Parses `#rrggbb` or `r g b` lines. Everything after `//` is a comment.
pub fn parse(text: &str) -> Result<Vec<Color>, String> {
    let mut colors = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = match line.find("//") {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let color = match line.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => parse_decimal(line),
        }
        .ok_or_else(|| format!("line {}: invalid color '{}'", lineno + 1, line))?;
        colors.push(color);
    }

    Ok(colors)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_decimal(line: &str) -> Option<Color> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>().ok());

    let color = Color::new(parts.next()??, parts.next()??, parts.next()??);
    match parts.next() {
        None => Some(color),
        Some(_) => None,
    }
}
