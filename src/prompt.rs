//! 生成提示词：把语气、篇幅（或字数上限）与用户输入拼成一条指令。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 字数上限取值范围
pub const MIN_WORD_LIMIT: u32 = 1;
pub const MAX_WORD_LIMIT: u32 = 10_000;

// ---------------------------------------------------------------------------
// 错误类型
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum PromptError {
    EmptyPrompt,
    /// 自定义语气为空
    EmptyTone,
    /// 字数上限不是正整数或超出范围，携带原始输入
    InvalidWordLimit(String),
    /// 篇幅不是 short / medium / long / custom
    UnknownLength(String),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::EmptyPrompt => f.write_str("Prompt cannot be empty."),
            PromptError::EmptyTone => f.write_str("Custom tone cannot be empty."),
            PromptError::InvalidWordLimit(raw) => write!(
                f,
                "Word limit must be a number between {MIN_WORD_LIMIT} and {MAX_WORD_LIMIT} (got {raw:?})."
            ),
            PromptError::UnknownLength(raw) => {
                write!(f, "Unknown length {raw:?}; use short, medium, long or custom.")
            }
        }
    }
}

impl std::error::Error for PromptError {}

// ---------------------------------------------------------------------------
// 语气
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Professional,
    Custom(String),
}

impl Tone {
    pub const PRESETS: [Tone; 3] = [Tone::Formal, Tone::Casual, Tone::Professional];

    /// 预设名称不区分大小写；其它非空文本视为自定义语气
    pub fn parse(label: &str) -> Result<Self, PromptError> {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Err(PromptError::EmptyTone),
            "formal" => Ok(Tone::Formal),
            "casual" => Ok(Tone::Casual),
            "professional" => Ok(Tone::Professional),
            _ => Ok(Tone::Custom(trimmed.to_string())),
        }
    }

    /// 表单选择："custom" 时取自定义输入框的内容
    pub fn from_selection(selected: &str, custom: Option<&str>) -> Result<Self, PromptError> {
        if selected.trim().eq_ignore_ascii_case("custom") {
            Self::custom(custom.unwrap_or_default())
        } else {
            Self::parse(selected)
        }
    }

    pub fn custom(label: &str) -> Result<Self, PromptError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(PromptError::EmptyTone);
        }
        Ok(Tone::Custom(trimmed.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Custom(label) => label,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// 篇幅
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLimit(u32);

impl WordLimit {
    pub fn new(value: u32) -> Result<Self, PromptError> {
        if (MIN_WORD_LIMIT..=MAX_WORD_LIMIT).contains(&value) {
            Ok(WordLimit(value))
        } else {
            Err(PromptError::InvalidWordLimit(value.to_string()))
        }
    }

    /// 只接受纯数字（不带符号），例如 "250"
    pub fn parse(raw: &str) -> Result<Self, PromptError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PromptError::InvalidWordLimit(raw.to_string()));
        }
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| PromptError::InvalidWordLimit(raw.to_string()))?;
        Self::new(value).map_err(|_| PromptError::InvalidWordLimit(raw.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for WordLimit {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
    /// 自定义字数上限
    Words(WordLimit),
}

impl Length {
    pub const PRESETS: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    /// `label` 为 short / medium / long / custom；custom 时必须给出字数上限
    pub fn parse(label: &str, word_limit: Option<&str>) -> Result<Self, PromptError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            "custom" | "word limit" | "words" => {
                let raw = word_limit.unwrap_or_default();
                Ok(Length::Words(WordLimit::parse(raw)?))
            }
            _ => Err(PromptError::UnknownLength(label.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PromptRequest
// ---------------------------------------------------------------------------

/// 已校验的生成请求；构造成功后 [`PromptRequest::format`] 不会失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    prompt: String,
    tone: Tone,
    length: Length,
}

impl PromptRequest {
    pub fn new(prompt: &str, tone: Tone, length: Length) -> Result<Self, PromptError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(PromptError::EmptyPrompt);
        }
        if let Tone::Custom(label) = &tone {
            if label.trim().is_empty() {
                return Err(PromptError::EmptyTone);
            }
        }
        Ok(Self {
            prompt: prompt.to_string(),
            tone,
            length,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn format(&self) -> String {
        let tone = self.tone.label().trim();
        match self.length {
            Length::Words(limit) => format!(
                "Write in a {tone} tone and limit to {} words. {}",
                limit.get(),
                self.prompt
            ),
            Length::Short => format!("Write in a {tone} tone and keep it short. {}", self.prompt),
            Length::Medium => format!("Write in a {tone} tone and keep it medium. {}", self.prompt),
            Length::Long => format!("Write in a {tone} tone and keep it long. {}", self.prompt),
        }
    }
}

// ---------------------------------------------------------------------------
// PromptForm：前端表单的原始输入
// ---------------------------------------------------------------------------

/// 两个前端共用的表单字段，均为未经校验的原始文本
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptForm {
    pub prompt: String,
    /// formal / casual / professional / custom
    pub tone: String,
    #[serde(default)]
    pub custom_tone: Option<String>,
    /// short / medium / long / custom
    pub length: String,
    #[serde(default)]
    pub word_limit: Option<String>,
}

impl PromptForm {
    /// 依次校验字数上限、语气、提示词，任何一项失败都不会发起请求
    pub fn validate(&self) -> Result<PromptRequest, PromptError> {
        let length = Length::parse(&self.length, self.word_limit.as_deref())?;
        let tone = Tone::from_selection(&self.tone, self.custom_tone.as_deref())?;
        PromptRequest::new(&self.prompt, tone, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_combination_embeds_tone_length_and_prompt() {
        let prompt = "Describe the harbor at dawn, with gulls.";
        let mut tones = Tone::PRESETS.to_vec();
        tones.push(Tone::custom("whimsical").unwrap());
        let mut lengths = Length::PRESETS.to_vec();
        lengths.push(Length::Words(WordLimit::new(120).unwrap()));

        for tone in &tones {
            for length in &lengths {
                let formatted = PromptRequest::new(prompt, tone.clone(), *length)
                    .unwrap()
                    .format();
                assert!(formatted.contains(tone.label()), "{formatted}");
                assert!(formatted.ends_with(prompt), "{formatted}");
                match length {
                    Length::Words(limit) => {
                        assert!(formatted.contains(&format!("limit to {} words", limit.get())))
                    }
                    Length::Short => assert!(formatted.contains("keep it short")),
                    Length::Medium => assert!(formatted.contains("keep it medium")),
                    Length::Long => assert!(formatted.contains("keep it long")),
                }
            }
        }
    }

    #[test]
    fn format_matches_expected_wording() {
        let req = PromptRequest::new("  Hello there ", Tone::Formal, Length::Short).unwrap();
        assert_eq!(req.format(), "Write in a formal tone and keep it short. Hello there");

        let req = PromptRequest::new(
            "Summarize.",
            Tone::Casual,
            Length::Words(WordLimit::new(50).unwrap()),
        )
        .unwrap();
        assert_eq!(req.format(), "Write in a casual tone and limit to 50 words. Summarize.");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert_eq!(
            PromptRequest::new("   \n", Tone::Formal, Length::Medium),
            Err(PromptError::EmptyPrompt)
        );
    }

    #[test]
    fn empty_custom_tone_is_rejected() {
        assert_eq!(Tone::custom("  "), Err(PromptError::EmptyTone));
        assert_eq!(Tone::parse(""), Err(PromptError::EmptyTone));
        assert_eq!(
            PromptRequest::new("hi", Tone::Custom(" ".into()), Length::Short),
            Err(PromptError::EmptyTone)
        );
    }

    #[test]
    fn tone_parse_presets_and_custom() {
        assert_eq!(Tone::parse("Formal").unwrap(), Tone::Formal);
        assert_eq!(Tone::parse(" casual ").unwrap(), Tone::Casual);
        assert_eq!(Tone::parse("noir").unwrap(), Tone::Custom("noir".into()));
    }

    #[test]
    fn tone_selection_uses_custom_field() {
        assert_eq!(
            Tone::from_selection("custom", Some(" upbeat ")).unwrap(),
            Tone::Custom("upbeat".into())
        );
        assert_eq!(Tone::from_selection("custom", None), Err(PromptError::EmptyTone));
        assert_eq!(Tone::from_selection("professional", Some("ignored")).unwrap(), Tone::Professional);
    }

    #[test]
    fn word_limit_must_be_positive_integer() {
        assert_eq!(WordLimit::parse("250").unwrap().get(), 250);
        assert_eq!(WordLimit::parse(" 7 ").unwrap().get(), 7);
        for bad in ["", "abc", "12a", "-5", "+5", "0", "3.5", "10001"] {
            assert!(
                matches!(WordLimit::parse(bad), Err(PromptError::InvalidWordLimit(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn form_validation_order_and_success() {
        let mut form = PromptForm {
            prompt: "Write about tides".into(),
            tone: "custom".into(),
            custom_tone: Some("lyrical".into()),
            length: "custom".into(),
            word_limit: Some("abc".into()),
        };
        assert_eq!(form.validate(), Err(PromptError::InvalidWordLimit("abc".into())));

        form.word_limit = Some("80".into());
        let request = form.validate().unwrap();
        assert_eq!(
            request.format(),
            "Write in a lyrical tone and limit to 80 words. Write about tides"
        );

        form.prompt = "  ".into();
        assert_eq!(form.validate(), Err(PromptError::EmptyPrompt));
    }

    #[test]
    fn length_parse_requires_limit_for_custom() {
        assert_eq!(Length::parse("short", None).unwrap(), Length::Short);
        assert_eq!(
            Length::parse("Custom", Some("300")).unwrap(),
            Length::Words(WordLimit::new(300).unwrap())
        );
        assert!(Length::parse("custom", None).is_err());
        assert!(Length::parse("custom", Some("many")).is_err());
        assert_eq!(
            Length::parse("huge", None),
            Err(PromptError::UnknownLength("huge".into()))
        );
    }
}
