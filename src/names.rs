use crate::LunarError;
use crate::consts::{
    DOUBLE_HOURS, LUNAR_DAY_ONES, LUNAR_DAY_TENS, LUNAR_MONTHS, MAX_LUNAR_DAY, MAX_MONTH,
};
use std::fmt;
use std::str::FromStr;

/// A lunar calendar month: a month number in `1..=12` plus a leap flag.
///
/// A leap month shares its number with the preceding common month and is
/// rendered with a 闰 prefix (`闰六月`). `FromStr` resolves the aliases
/// `十一月` → `冬月` and `十二月` → `腊月`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarMonth {
    number: u8,
    leap: bool,
}

impl LunarMonth {
    /// Creates a lunar month.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidMonthNumber` if `number` is outside
    /// `1..=12`.
    pub fn new(number: u8, leap: bool) -> Result<Self, LunarError> {
        if number == 0 || number > MAX_MONTH {
            return Err(LunarError::InvalidMonthNumber(number));
        }
        Ok(Self { number, leap })
    }

    /// Returns the month number, `1..=12`, leap or not
    #[inline]
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Returns `true` for a leap month
    #[inline]
    pub const fn is_leap(self) -> bool {
        self.leap
    }

    /// The canonical month name without the leap prefix (`正月`, …, `腊月`)
    pub fn name(self) -> &'static str {
        LUNAR_MONTHS[usize::from(self.number)]
    }
}

impl fmt::Display for LunarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leap {
            f.write_str("闰")?;
        }
        f.write_str(self.name())
    }
}

impl FromStr for LunarMonth {
    type Err = LunarError;

    /// Parses a month label, with an optional 闰 prefix marking a leap month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (leap, label) = match s.strip_prefix('闰') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let number =
            lunar_month_number(label).ok_or_else(|| LunarError::InvalidMonthLabel(s.to_owned()))?;
        Self::new(number, leap)
    }
}

impl TryFrom<u8> for LunarMonth {
    type Error = LunarError;

    /// Converts a plain month number into a common (non-leap) month.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value, false)
    }
}

/// A lunar day of month, `1..=30`.
///
/// `Display` renders the traditional label (`初一` … `三十`); `FromStr`
/// tokenizes labels including the irregular `二十`/`三十` forms and the
/// three-character alternate `二十二` for `廿二`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LunarDay(u8);

impl LunarDay {
    /// Creates a lunar day.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidDayNumber` if `value` is outside `1..=30`.
    pub fn new(value: u8) -> Result<Self, LunarError> {
        if value == 0 || value > MAX_LUNAR_DAY {
            return Err(LunarError::InvalidDayNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the day number, `1..=30`
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LunarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tens, ones) = match self.0 {
            d @ 1..=10 => (0u8, d),
            d @ 11..=19 => (1, d - 10),
            20 => (4, 10),
            d @ 21..=29 => (2, d - 20),
            _ => (3, 10), // 30; the constructor admits nothing larger
        };
        write!(
            f,
            "{}{}",
            LUNAR_DAY_TENS[usize::from(tens)],
            LUNAR_DAY_ONES[usize::from(ones)]
        )
    }
}

impl FromStr for LunarDay {
    type Err = LunarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lunar_day_number(s)
            .ok_or_else(|| LunarError::InvalidDayLabel(s.to_owned()))
            .and_then(Self::new)
    }
}

impl TryFrom<u8> for LunarDay {
    type Error = LunarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The lunar month name for a month number, or `None` outside `1..=12`.
///
/// # Example
///
/// ```
/// use chinese_lunar::lunar_month_name;
///
/// assert_eq!(Some("正月"), lunar_month_name(1));
/// assert_eq!(Some("冬月"), lunar_month_name(11));
/// assert_eq!(None, lunar_month_name(13));
/// ```
pub fn lunar_month_name(month: u8) -> Option<&'static str> {
    if month == 0 || month > MAX_MONTH {
        return None;
    }
    Some(LUNAR_MONTHS[usize::from(month)])
}

/// The month number for a lunar month name, or `None` when the label is not
/// in the table. Accepts the aliases `十一月` and `十二月`.
///
/// # Example
///
/// ```
/// use chinese_lunar::lunar_month_number;
///
/// assert_eq!(Some(12), lunar_month_number("腊月"));
/// assert_eq!(Some(12), lunar_month_number("十二月"));
/// assert_eq!(None, lunar_month_number("闰月"));
/// ```
pub fn lunar_month_number(label: &str) -> Option<u8> {
    let canonical = match label {
        "十一月" => "冬月",
        "十二月" => "腊月",
        other => other,
    };
    LUNAR_MONTHS
        .iter()
        .skip(1)
        .position(|&name| name == canonical)
        .map(|idx| idx as u8 + 1)
}

/// The traditional label for a lunar day number, or `None` outside `1..=30`.
///
/// # Example
///
/// ```
/// use chinese_lunar::lunar_day_name;
///
/// assert_eq!(Some("初一".to_owned()), lunar_day_name(1));
/// assert_eq!(Some("二十".to_owned()), lunar_day_name(20));
/// assert_eq!(None, lunar_day_name(31));
/// ```
pub fn lunar_day_name(day: u8) -> Option<String> {
    LunarDay::new(day).ok().map(|d| d.to_string())
}

/// The day number for a traditional lunar day label, or `None` when the
/// label does not tokenize.
///
/// The irregular two-character names `二十` (20) and `三十` (30) are
/// recognized literally, and the three-character alternate `二十X` is
/// normalized to `廿X` before tens/ones decomposition.
///
/// # Example
///
/// ```
/// use chinese_lunar::lunar_day_number;
///
/// assert_eq!(Some(1), lunar_day_number("初一"));
/// assert_eq!(Some(22), lunar_day_number("廿二"));
/// assert_eq!(Some(22), lunar_day_number("二十二"));
/// assert_eq!(Some(30), lunar_day_number("三十"));
/// assert_eq!(None, lunar_day_number("卅一"));
/// ```
pub fn lunar_day_number(label: &str) -> Option<u8> {
    let mut chars: Vec<char> = label.chars().collect();
    if chars.len() == 3 && chars[0] == '二' && chars[1] == '十' {
        let ones = chars[2];
        chars = vec!['廿', ones];
    }
    match chars.as_slice() {
        ['二', '十'] => Some(20),
        ['三', '十'] => Some(30),
        &[tens, ones] => {
            let (t, o) = day_tokens(tens, ones)?;
            Some(t * 10 + o)
        }
        _ => None,
    }
}

/// Decomposes a regular two-character day label into its (tens, ones)
/// values. The irregular literals are handled before this point, so the
/// tens digit here is limited to 初 (0), 十 (1), and 廿 (2).
fn day_tokens(tens: char, ones: char) -> Option<(u8, u8)> {
    let t = match tens {
        '初' => 0,
        '十' => 1,
        '廿' => 2,
        _ => return None,
    };
    let o = LUNAR_DAY_ONES
        .iter()
        .skip(1)
        .position(|name| name.chars().next() == Some(ones))
        .map(|idx| idx as u8 + 1)?;
    Some((t, o))
}

/// The traditional double-hour (时辰) name for an hour of day, or `None`
/// outside `0..=23`.
///
/// The cycle closes at midnight: `ancient_time(23) == ancient_time(0)`.
///
/// # Example
///
/// ```
/// use chinese_lunar::ancient_time;
///
/// assert_eq!(Some("子时"), ancient_time(0));
/// assert_eq!(Some("午时"), ancient_time(12));
/// assert_eq!(Some("子时"), ancient_time(23));
/// assert_eq!(None, ancient_time(24));
/// ```
pub fn ancient_time(hour: u8) -> Option<&'static str> {
    DOUBLE_HOURS
        .iter()
        .find(|&&(start, end, _)| hour >= start && hour < end)
        .map(|&(_, _, name)| name)
}
