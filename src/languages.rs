use colored::Color;
use rand::seq::SliceRandom;
use rand::Rng;

/// Named page background with its RGB value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl Background {
    pub fn color(&self) -> Color {
        let (r, g, b) = self.rgb;
        Color::TrueColor { r, g, b }
    }
}

pub const NEUTRAL_BACKGROUND: Background = Background {
    name: "rgb(234, 237, 240)",
    rgb: (234, 237, 240),
};

/// One selectable target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub flag: &'static str,
    pub style_class: &'static str,
    pub background: Background,
}

pub const SOURCE_LANGUAGE: &str = "it";

pub static LANGUAGES: [Language; 4] = [
    Language {
        code: "en",
        flag: "🇬🇧",
        style_class: "english",
        background: Background {
            name: "lightblue",
            rgb: (173, 216, 230),
        },
    },
    Language {
        code: "fr",
        flag: "🇫🇷",
        style_class: "french",
        background: Background {
            name: "lightcoral",
            rgb: (240, 128, 128),
        },
    },
    Language {
        code: "es",
        flag: "🇪🇸",
        style_class: "spanish",
        background: Background {
            name: "lightgoldenrodyellow",
            rgb: (250, 250, 210),
        },
    },
    Language {
        code: "de",
        flag: "🇩🇪",
        style_class: "german",
        background: Background {
            name: "lightgray",
            rgb: (211, 211, 211),
        },
    },
];

/// Look up a language by code (case-insensitive)
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim().to_lowercase();
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Resolve a button reference: either a code ("en") or a 1-based position ("1")
pub fn resolve(reference: &str) -> Option<&'static Language> {
    match reference.trim().parse::<usize>() {
        Ok(position) if position >= 1 => LANGUAGES.get(position - 1),
        Ok(_) => None,
        Err(_) => find(reference),
    }
}

pub fn random_language<R: Rng + ?Sized>(rng: &mut R) -> &'static Language {
    // LANGUAGES is a non-empty constant
    LANGUAGES.choose(rng).unwrap_or(&LANGUAGES[0])
}
