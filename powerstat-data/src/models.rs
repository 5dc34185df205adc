use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ParseErrorKind;

pub const MAIN_MAX: u8 = 69;
pub const POWERBALL_MAX: u8 = 26;
pub const MAIN_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRecord {
    pub date: NaiveDate,
    /// Ordre de tirage, non trié.
    pub main: [u8; MAIN_COUNT],
    pub powerball: u8,
    pub multiplier: Option<u8>,
}

impl DrawRecord {
    /// Reproduit la colonne "Winning Numbers" du fichier source.
    pub fn winning_numbers(&self) -> String {
        self.main
            .iter()
            .chain(std::iter::once(&self.powerball))
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pool {
    Main,
    Powerball,
}

impl Pool {
    pub fn max(&self) -> u8 {
        match self {
            Pool::Main => MAIN_MAX,
            Pool::Powerball => POWERBALL_MAX,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => MAIN_COUNT,
            Pool::Powerball => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pool::Main => "Boules",
            Pool::Powerball => "Powerball",
        }
    }

    pub fn numbers_from<'a>(&self, draw: &'a DrawRecord) -> &'a [u8] {
        match self {
            Pool::Main => &draw.main,
            Pool::Powerball => std::slice::from_ref(&draw.powerball),
        }
    }
}

pub fn validate_draw(main: &[u8; MAIN_COUNT], powerball: u8) -> Result<(), ParseErrorKind> {
    for &b in main {
        if !(1..=MAIN_MAX).contains(&b) {
            return Err(ParseErrorKind::MainOutOfRange(b));
        }
    }
    if !(1..=POWERBALL_MAX).contains(&powerball) {
        return Err(ParseErrorKind::PowerballOutOfRange(powerball));
    }
    for i in 0..main.len() {
        for j in (i + 1)..main.len() {
            if main[i] == main[j] {
                return Err(ParseErrorKind::DuplicateMain(main[i]));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw() -> DrawRecord {
        DrawRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            main: [12, 3, 45, 67, 8],
            powerball: 9,
            multiplier: Some(2),
        }
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], 1).is_ok());
        assert!(validate_draw(&[69, 68, 67, 66, 65], 26).is_ok());
    }

    #[test]
    fn test_validate_draw_main_out_of_range() {
        assert_eq!(
            validate_draw(&[0, 2, 3, 4, 5], 1),
            Err(ParseErrorKind::MainOutOfRange(0))
        );
        assert_eq!(
            validate_draw(&[1, 2, 3, 4, 70], 1),
            Err(ParseErrorKind::MainOutOfRange(70))
        );
    }

    #[test]
    fn test_validate_draw_powerball_out_of_range() {
        assert_eq!(
            validate_draw(&[1, 2, 3, 4, 5], 27),
            Err(ParseErrorKind::PowerballOutOfRange(27))
        );
        assert!(validate_draw(&[1, 2, 3, 4, 5], 0).is_err());
    }

    #[test]
    fn test_validate_draw_duplicate_main() {
        assert_eq!(
            validate_draw(&[1, 1, 3, 4, 5], 1),
            Err(ParseErrorKind::DuplicateMain(1))
        );
    }

    #[test]
    fn test_pool_bounds() {
        assert_eq!(Pool::Main.max(), 69);
        assert_eq!(Pool::Powerball.max(), 26);
        assert_eq!(Pool::Main.pick_count(), 5);
        assert_eq!(Pool::Powerball.pick_count(), 1);
    }

    #[test]
    fn test_pool_numbers_from() {
        let d = draw();
        assert_eq!(Pool::Main.numbers_from(&d), &[12, 3, 45, 67, 8]);
        assert_eq!(Pool::Powerball.numbers_from(&d), &[9]);
    }

    #[test]
    fn test_winning_numbers() {
        assert_eq!(draw().winning_numbers(), "12 03 45 67 08 09");
    }
}
