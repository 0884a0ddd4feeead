use anyhow::{Result, bail};
use image::Rgba;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static REGEX_HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("Invalid regex")
});

static REGEX_RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([01](?:\.\d+)?|\.\d+)\s*)?\)$",
    )
    .expect("Invalid regex")
});

/// 精靈圖背景
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Color(Rgba<u8>),
}

impl Background {
    #[must_use]
    pub const fn pixel(self) -> Rgba<u8> {
        match self {
            Self::Transparent => Rgba([0, 0, 0, 0]),
            Self::Color(color) => color,
        }
    }
}

impl FromStr for Background {
    type Err = anyhow::Error;

    /// 接受 `transparent`、常用色名、`#rgb`、`#rrggbb`、`#rrggbbaa`、`rgb()`、`rgba()`
    fn from_str(input: &str) -> Result<Self> {
        let value = input.trim().to_lowercase();

        let named = match value.as_str() {
            "" | "transparent" => return Ok(Self::Transparent),
            "black" => Some([0, 0, 0]),
            "white" => Some([255, 255, 255]),
            "red" => Some([255, 0, 0]),
            "green" => Some([0, 128, 0]),
            "blue" => Some([0, 0, 255]),
            "gray" | "grey" => Some([128, 128, 128]),
            _ => None,
        };
        if let Some([r, g, b]) = named {
            return Ok(Self::Color(Rgba([r, g, b, 255])));
        }

        if let Some(caps) = REGEX_HEX_COLOR.captures(&value) {
            return Ok(Self::Color(parse_hex(&caps[1])));
        }

        if let Some(caps) = REGEX_RGB_FUNCTION.captures(&value) {
            let mut channels = [0u8; 3];
            for (channel, index) in channels.iter_mut().zip(1..=3) {
                let Ok(component) = caps[index].parse::<u8>() else {
                    bail!("色彩分量超出範圍: {input}");
                };
                *channel = component;
            }
            let alpha = caps
                .get(4)
                .and_then(|a| a.as_str().parse::<f64>().ok())
                .map_or(255, |a| (a.clamp(0.0, 1.0) * 255.0).round() as u8);
            let [r, g, b] = channels;
            return Ok(Self::Color(Rgba([r, g, b, alpha])));
        }

        bail!("無法解析背景色: {input}")
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Color(Rgba([r, g, b, 255])) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Color(Rgba([r, g, b, a])) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

/// 已通過正規表示式驗證，只含 3/6/8 個十六進位字元
fn parse_hex(digits: &str) -> Rgba<u8> {
    let nibble = |c: u8| (c as char).to_digit(16).unwrap_or(0) as u8;
    let bytes = digits.as_bytes();

    match bytes.len() {
        3 => {
            let [r, g, b] = [bytes[0], bytes[1], bytes[2]].map(|c| nibble(c) * 17);
            Rgba([r, g, b, 255])
        }
        _ => {
            let mut channels = [255u8; 4];
            for (channel, pair) in channels.iter_mut().zip(bytes.chunks(2)) {
                *channel = nibble(pair[0]) * 16 + nibble(pair[1]);
            }
            Rgba(channels)
        }
    }
}
