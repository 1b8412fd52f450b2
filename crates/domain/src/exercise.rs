//! # 運動記録
//!
//! ユーザーに紐づく運動記録エンティティと値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - `user_id` はユーザーへの弱参照（作成時に存在確認するのみで、以後の整合性は保証しない）
//! - `username` は作成時点のユーザー名の非正規化コピー
//! - 日付は `YYYY-MM-DD` で保持し、読み出し時に `Thu Jan 05 2023` 形式で表示する

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    DomainError,
    user::{UserId, UserName},
};

define_uuid_id! {
    /// 運動記録 ID
    pub struct ExerciseId { label: "運動記録 ID" }
}

define_validated_string! {
    /// 運動内容の説明（値オブジェクト）
    ///
    /// 空文字列ではないこと（前後の空白はトリム）のみを検証する。長さの上限は設けない。
    pub struct Description {
        label: "description",
    }
}

/// 運動時間（分）
///
/// 文字列入力は整数として厳密にパースする。数値でない入力を黙って
/// 不正な値として保存することはしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    pub fn new(minutes: i64) -> Result<Self, DomainError> {
        if minutes < 0 {
            return Err(DomainError::Validation(
                "duration は 0 以上である必要があります".to_string(),
            ));
        }
        i32::try_from(minutes).map(Self).map_err(|_| {
            DomainError::Validation(format!("duration が大きすぎます: {minutes}"))
        })
    }

    /// 文字列から運動時間をパースする
    ///
    /// 前後の空白は無視する。空文字列・小数・数値以外は検証エラー。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("duration は必須です".to_string()));
        }
        let minutes: i64 = trimmed.parse().map_err(|_| {
            DomainError::Validation(format!("duration は整数である必要があります: {value}"))
        })?;
        Self::new(minutes)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

/// 運動記録の日付
///
/// 保存形式は ISO 8601 の日付部分（`YYYY-MM-DD`）。辞書順と日付順が一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    const FORMAT: &'static str = "%Y-%m-%d";
    const HUMAN_FORMAT: &'static str = "%a %b %d %Y";

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// `YYYY-MM-DD` 形式の文字列をパースする
    ///
    /// 桁数は固定。`2023-1-5` や符号付きの年は受け付けない。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || {
            DomainError::Validation(format!(
                "日付は YYYY-MM-DD 形式である必要があります: {value}"
            ))
        };

        let trimmed = value.trim();
        if !has_iso_date_shape(trimmed) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// UNIX エポック（1970-01-01）
    pub fn epoch() -> Self {
        Self(NaiveDate::default())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// 表示用の日付文字列（例: `Thu Jan 05 2023`）
    pub fn to_human_string(&self) -> String {
        self.0.format(Self::HUMAN_FORMAT).to_string()
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// 運動記録の作成パラメータ
pub struct NewExercise {
    pub id:          ExerciseId,
    pub user_id:     UserId,
    pub username:    UserName,
    pub description: Description,
    pub duration:    DurationMinutes,
    pub date:        ExerciseDate,
    pub now:         DateTime<Utc>,
}

/// 運動記録エンティティ
///
/// # 不変条件
///
/// - 作成時点で `user_id` のユーザーが存在する（ユースケース層で確認）
/// - 作成後に更新・削除されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id:          ExerciseId,
    user_id:     UserId,
    username:    UserName,
    description: Description,
    duration:    DurationMinutes,
    date:        ExerciseDate,
    created_at:  DateTime<Utc>,
}

impl Exercise {
    pub fn new(params: NewExercise) -> Self {
        Self {
            id:          params.id,
            user_id:     params.user_id,
            username:    params.username,
            description: params.description,
            duration:    params.duration,
            date:        params.date,
            created_at:  params.now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(
        id: ExerciseId,
        user_id: UserId,
        username: UserName,
        description: Description,
        duration: DurationMinutes,
        date: ExerciseDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            username,
            description,
            duration,
            date,
            created_at,
        }
    }

    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn date(&self) -> ExerciseDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
