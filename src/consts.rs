/// Earliest year with lunar calendar data (inclusive)
pub const MIN_YEAR: u16 = 1901;

/// Latest year with lunar calendar data (inclusive)
pub const MAX_YEAR: u16 = 2100;

/// Latest year a `SolarDate` can represent (inclusive)
pub const MAX_SOLAR_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Maximum valid lunar day (三十)
pub const MAX_LUNAR_DAY: u8 = 30;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Canonical lunar month names (index 0 unused, months are 1-indexed).
/// The 11th and 12th months go by 冬月 and 腊月; the plain forms 十一月 and
/// 十二月 are accepted as input aliases.
pub const LUNAR_MONTHS: [&str; 13] = [
    "", "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月",
    "腊月",
];

/// Ones digits of lunar day names (index 0 unused; index 10 is 十)
pub const LUNAR_DAY_ONES: [&str; 11] =
    ["", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// Tens prefixes of lunar day names, indexed by tens value:
/// 0 → 初 (1–10), 1 → 十 (11–19), 2 → 廿 (21–29), 3 → 三 (day 30 only),
/// 4 → 二 (day 20 only)
pub const LUNAR_DAY_TENS: [&str; 5] = ["初", "十", "廿", "三", "二"];

/// The ten heavenly stems (天干)
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches (地支)
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals, rotated so that `ZODIAC[year % 12]` is the animal of
/// `year` directly (no anchor offset)
pub const ZODIAC: [&str; 12] = [
    "猴", "鸡", "狗", "猪", "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊",
];

/// The 24 solar term names in calendar-year order (小寒 falls in early
/// January). Year records carry one dated entry per name.
pub const SOLAR_TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

/// Double-hour (时辰) names keyed by half-open hour intervals.
/// The final `[23, 24)` entry repeats 子时, closing the cycle at midnight.
pub const DOUBLE_HOURS: [(u8, u8, &str); 13] = [
    (0, 1, "子时"),
    (1, 3, "丑时"),
    (3, 5, "寅时"),
    (5, 7, "卯时"),
    (7, 9, "辰时"),
    (9, 11, "巳时"),
    (11, 13, "午时"),
    (13, 15, "未时"),
    (15, 17, "申时"),
    (17, 19, "酉时"),
    (19, 21, "戌时"),
    (21, 23, "亥时"),
    (23, 24, "子时"),
];

/// Offset that maps days-since-Unix-epoch of a date onto the sexagenary day
/// cycle. Calibrated against a fixed reference date; do not re-derive.
pub const DAY_PILLAR_EPOCH_OFFSET: i64 = 25567 + 10;

/// Julian day number of 1970-01-01 (the Unix epoch)
pub(crate) const UNIX_EPOCH_JDN: i64 = 2_440_588;
/// Seconds per civil day
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;
