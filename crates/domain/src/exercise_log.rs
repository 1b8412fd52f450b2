//! # 運動ログ検索条件
//!
//! ログ取得時のクエリパラメータ（`from`, `to`, `limit`）を解決し、
//! ストアに渡す検索条件を組み立てる。
//!
//! ## 解決ルール
//!
//! | パラメータ | 省略時 | 不正値 |
//! |-----------|--------|--------|
//! | `from` | `1970-01-01` | 検証エラー |
//! | `to` | 今日（UTC） | 検証エラー |
//! | `limit` | 無制限 | 無制限（数値でない・1 未満） |
//!
//! 範囲は両端を含む。`from > to` の場合は空の範囲となり、エラーにはしない。

use chrono::NaiveDate;

use crate::{DomainError, exercise::ExerciseDate, user::UserId};

/// 両端を含む日付範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: ExerciseDate,
    to:   ExerciseDate,
}

impl DateRange {
    pub fn new(from: ExerciseDate, to: ExerciseDate) -> Self {
        Self { from, to }
    }

    /// クエリ文字列から範囲を解決する
    ///
    /// 空文字列は省略として扱う。
    pub fn resolve(
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let from = match non_blank(from) {
            Some(value) => ExerciseDate::parse(value)?,
            None => ExerciseDate::epoch(),
        };
        let to = match non_blank(to) {
            Some(value) => ExerciseDate::parse(value)?,
            None => ExerciseDate::from_naive(today),
        };
        Ok(Self { from, to })
    }

    pub fn from(&self) -> ExerciseDate {
        self.from
    }

    pub fn to(&self) -> ExerciseDate {
        self.to
    }

    pub fn contains(&self, date: ExerciseDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// ログの最大件数
///
/// `None` は無制限を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogLimit(Option<u32>);

impl LogLimit {
    pub fn unbounded() -> Self {
        Self(None)
    }

    pub fn at_most(max: u32) -> Self {
        if max == 0 { Self(None) } else { Self(Some(max)) }
    }

    /// クエリ文字列から件数上限を解決する
    ///
    /// 数値として解釈できない値、1 未満の値は無制限とする。
    /// 小数は切り捨てる（`"2.9"` → 2）。
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = non_blank(value) else {
            return Self::unbounded();
        };
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 1.0 => {
                Self::at_most(n.trunc().min(f64::from(u32::MAX)) as u32)
            }
            _ => Self::unbounded(),
        }
    }

    pub fn get(&self) -> Option<u32> {
        self.0
    }

    /// 上限を `i64` で返す（SQL の `LIMIT` 用、無制限は `None`）
    pub fn as_i64(&self) -> Option<i64> {
        self.0.map(i64::from)
    }
}

/// 運動ログの検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLogQuery {
    pub user_id: UserId,
    pub range:   DateRange,
    pub limit:   LogLimit,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn date(value: &str) -> ExerciseDate {
        ExerciseDate::parse(value).unwrap()
    }

    #[test]
    fn test_範囲省略時はエポックから今日まで() {
        let range = DateRange::resolve(None, None, today()).unwrap();

        assert_eq!(range.from().to_string(), "1970-01-01");
        assert_eq!(range.to().to_string(), "2024-06-15");
    }

    #[test]
    fn test_空文字列は省略として扱う() {
        let range = DateRange::resolve(Some(""), Some("  "), today()).unwrap();

        assert_eq!(range, DateRange::new(ExerciseDate::epoch(), date("2024-06-15")));
    }

    #[test]
    fn test_範囲は両端を含む() {
        let range = DateRange::resolve(Some("2023-01-01"), Some("2023-01-31"), today()).unwrap();

        assert!(range.contains(date("2023-01-01")));
        assert!(range.contains(date("2023-01-31")));
        assert!(!range.contains(date("2022-12-31")));
        assert!(!range.contains(date("2023-02-01")));
    }

    #[test]
    fn test_fromがtoより後なら何も含まない() {
        let range = DateRange::resolve(Some("2023-02-01"), Some("2023-01-01"), today()).unwrap();

        assert!(!range.contains(date("2023-01-15")));
    }

    #[test]
    fn test_不正な日付は検証エラー() {
        let result = DateRange::resolve(Some("yesterday"), None, today());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("abc"), None)]
    #[case(Some("0"), None)]
    #[case(Some("-3"), None)]
    #[case(Some("1"), Some(1))]
    #[case(Some("10"), Some(10))]
    #[case(Some("2.9"), Some(2))]
    fn test_limitの解決(#[case] input: Option<&str>, #[case] expected: Option<u32>) {
        assert_eq!(LogLimit::parse(input).get(), expected);
    }
}
