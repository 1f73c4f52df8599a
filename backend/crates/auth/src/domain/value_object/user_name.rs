//! User Name Value Object
//!
//! ユーザー名は、アカウントを一意に識別する公開識別子。
//! ログイン、トークンの `sub` クレーム、ストア検索のキーとして使用される。
//!
//! ## 不変条件
//! - 空文字列、および空白のみの文字列は不可
//! - 入力はそのまま保持する（大文字小文字・前後の空白を変換しない）
//!   ストアの検索は完全一致のため、正規化すると別レコードと衝突しうる

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty or whitespace only
    Empty,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserNameError::Empty => f.write_str("username cannot be empty"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(value: impl Into<String>) -> Result<Self, UserNameError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserNameError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
