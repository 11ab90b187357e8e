/// DB 採番の整数 ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i32` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 既存の値から ID を作成
/// - `as_i32()`: 内部値の取得
/// - `From<i32>`
///
/// シリアライズ時は `#[serde(transparent)]` により素の数値になる。
///
/// # 使用例
///
/// ```rust
/// use petclinic_domain::owner::OwnerId;
///
/// let id = OwnerId::new(5);
/// assert_eq!(id.as_i32(), 5);
/// assert_eq!(id.to_string(), "5");
/// ```
macro_rules! define_serial_id {
   (
      $(#[$meta:meta])*
      $vis:vis struct $Name:ident;
   ) => {
      $(#[$meta])*
      #[derive(
         Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
         serde::Serialize, serde::Deserialize,
         derive_more::Display,
      )]
      #[serde(transparent)]
      #[display("{_0}")]
      $vis struct $Name(i32);

      impl $Name {
         /// DB が採番した値から ID を作成する
         pub fn new(value: i32) -> Self {
            Self(value)
         }

         /// 内部の整数値を取得する
         pub fn as_i32(&self) -> i32 {
            self.0
         }
      }

      impl From<i32> for $Name {
         fn from(value: i32) -> Self {
            Self(value)
         }
      }
   };
}

/// 前後の空白を除去し、空でないことを検証する
///
/// フォーム入力の必須チェックで共通利用する。
pub(crate) fn require_text(value: String, label: &str) -> Result<String, crate::DomainError> {
   let trimmed = value.trim();
   if trimmed.is_empty() {
      return Err(crate::DomainError::Validation(format!("{label}は必須です")));
   }
   Ok(trimmed.to_string())
}

/// 必須チェックに加え、文字数が上限以内であることを検証する
///
/// 上限は格納先カラムの `VARCHAR(n)` と揃える。
pub(crate) fn require_text_within(
   value: String,
   label: &str,
   max_chars: usize,
) -> Result<String, crate::DomainError> {
   let text = require_text(value, label)?;
   if text.chars().count() > max_chars {
      return Err(crate::DomainError::Validation(format!(
         "{label}は {max_chars} 文字以内で入力してください"
      )));
   }
   Ok(text)
}
