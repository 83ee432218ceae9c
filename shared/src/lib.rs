use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端成功响应的唯一标识
pub const CODE_OK: &str = "COD_OK";
/// 网络层失败时客户端生成的错误码
pub const CODE_NETWORK_ERROR: &str = "COD_NETWORK_ERROR";
/// 响应体无法解析为信封时的错误码
pub const CODE_INVALID_RESPONSE: &str = "COD_INVALID_RESPONSE";

pub const STORAGE_USER_KEY: &str = "user";
pub const STORAGE_TOKEN_KEY: &str = "access_token";
pub const STORAGE_USER_ID_KEY: &str = "iduser";

pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 宽松的 ID 反序列化
// =========================================================

/// 后端的 ID 字段有时是字符串，有时是数字
pub mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Text(s) => s,
                RawId::Int(n) => n.to_string(),
            }
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(String::from)
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
    }
}

// =========================================================
// 角色 (Roles)
// =========================================================

/// 系统中的两种角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "ESTUDIANTE")]
    Student,
}

impl Role {
    /// 线上传输使用的角色标签
    pub const fn tag(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Student => "ESTUDIANTE",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "ESTUDIANTE" => Some(Role::Student),
            _ => None,
        }
    }
}

// =========================================================
// 用户 (Users)
// =========================================================

/// 归一化后的用户信息
///
/// 后端存在两套字段命名（`firstName`/`lastName` 与 `nombre`/`apellido`），
/// 这里通过 alias 统一接收，序列化时只输出 camelCase 形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "nombre")]
    pub first_name: String,
    #[serde(default, alias = "apellido")]
    pub last_name: String,
    #[serde(default, alias = "rol")]
    pub role: String,
    #[serde(default, alias = "foto", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// =========================================================
// 贡献 (Contributions)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    #[default]
    Dictionary,
    Story,
}

impl ContributionType {
    /// 界面显示用的名称
    pub const fn label(&self) -> &'static str {
        match self {
            ContributionType::Dictionary => "Palabra",
            ContributionType::Story => "Cuento",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// 词典类贡献的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryContent {
    #[serde(default)]
    pub word_shuar: String,
    #[serde(default)]
    pub word_spanish: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_description: String,
}

impl DictionaryContent {
    /// `examples[0]` 是规范例句
    pub fn canonical_example(&self) -> Option<&str> {
        self.examples.first().map(String::as_str)
    }
}

/// 故事类贡献的内容
///
/// 字段命名沿用后端（snake_case 与 camelCase 混用）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoryContent {
    #[serde(default)]
    pub title_shuar: String,
    #[serde(default, rename = "title_español", alias = "title_espanol")]
    pub title_spanish: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "contentShuar")]
    pub content_shuar: String,
    #[serde(default, rename = "contentSpanish")]
    pub content_spanish: String,
    #[serde(default, rename = "coverImage")]
    pub cover_image: Option<String>,
    #[serde(default, rename = "imageDescription")]
    pub image_description: String,
}

/// 贡献内容（按 `type` 区分的变体）
///
/// 序列化时只输出内部对象，类型标签由外层的 `type` 字段承载。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContributionData {
    Dictionary(DictionaryContent),
    Story(StoryContent),
}

impl ContributionData {
    pub fn kind(&self) -> ContributionType {
        match self {
            ContributionData::Dictionary(_) => ContributionType::Dictionary,
            ContributionData::Story(_) => ContributionType::Story,
        }
    }

    /// 主要展示字段：词典为 Shuar 单词，故事为 Shuar 标题
    pub fn primary_text(&self) -> &str {
        match self {
            ContributionData::Dictionary(word) => &word.word_shuar,
            ContributionData::Story(story) => &story.title_shuar,
        }
    }

    /// 次要展示字段：对应的西班牙语
    pub fn secondary_text(&self) -> &str {
        match self {
            ContributionData::Dictionary(word) => &word.word_spanish,
            ContributionData::Story(story) => &story.title_spanish,
        }
    }
}

/// 学生提交的贡献
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawContribution")]
pub struct Contribution {
    pub id: String,
    pub status: ContributionStatus,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub data: ContributionData,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

impl Contribution {
    pub fn kind(&self) -> ContributionType {
        self.data.kind()
    }

    pub fn is_pending(&self) -> bool {
        self.status == ContributionStatus::Pending
    }

    pub fn submitter_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("")
    }
}

/// 线上格式：`data` 的结构取决于 `type`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContribution {
    #[serde(alias = "_id", deserialize_with = "lenient::id")]
    id: String,
    #[serde(rename = "type")]
    kind: ContributionType,
    #[serde(default)]
    status: ContributionStatus,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    user_id: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user_avatar: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
    created_at: Timestamp,
    #[serde(default)]
    resolved_at: Option<Timestamp>,
}

impl TryFrom<RawContribution> for Contribution {
    type Error = serde_json::Error;

    fn try_from(raw: RawContribution) -> Result<Self, Self::Error> {
        let data = match raw.kind {
            ContributionType::Dictionary => {
                ContributionData::Dictionary(serde_json::from_value(raw.data)?)
            }
            ContributionType::Story => ContributionData::Story(serde_json::from_value(raw.data)?),
        };

        Ok(Self {
            id: raw.id,
            status: raw.status,
            user_id: raw.user_id,
            user_name: raw.user_name,
            user_avatar: raw.user_avatar,
            data,
            created_at: raw.created_at,
            resolved_at: raw.resolved_at,
        })
    }
}

/// 逐条解码的贡献列表
///
/// 单条记录无法解码时跳过该条并保留错误信息，其余记录照常返回。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionList {
    pub items: Vec<Contribution>,
    /// 被跳过记录的 `(id, 错误)`；没有可读 id 时为空字符串
    pub skipped: Vec<(String, String)>,
}

impl<'de> Deserialize<'de> for ContributionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut list = ContributionList {
            items: Vec::with_capacity(records.len()),
            skipped: Vec::new(),
        };
        for record in records {
            let id = record
                .get("id")
                .or_else(|| record.get("_id"))
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .unwrap_or_default();
            match serde_json::from_value::<Contribution>(record) {
                Ok(item) => list.items.push(item),
                Err(e) => list.skipped.push((id, e.to_string())),
            }
        }
        Ok(list)
    }
}

// =========================================================
// 管理端内容 (Master Content)
// =========================================================

/// 发布状态
///
/// 后端并非对所有内容都返回该字段；缺失时界面按“已发布”显示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    #[default]
    #[serde(alias = "Publicado", alias = "publicado")]
    Published,
    #[serde(alias = "Borrador", alias = "borrador")]
    Draft,
}

impl PublishState {
    pub const fn label(&self) -> &'static str {
        match self {
            PublishState::Published => "Publicado",
            PublishState::Draft => "Borrador",
        }
    }

    /// 字段缺失时的显示值
    pub fn display(state: Option<PublishState>) -> &'static str {
        state.unwrap_or_default().label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DictionaryEntry {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(flatten)]
    pub content: DictionaryContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(default)]
    pub title_shuar: String,
    #[serde(default)]
    pub title_spanish: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Story {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "lenient::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(flatten)]
    pub content: StoryContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_dictionary_contribution() {
        let value = json!({
            "id": 42,
            "type": "dictionary",
            "status": "pending",
            "userId": 7,
            "userName": "Ana Tsamaraint",
            "data": {
                "wordShuar": "Entsa",
                "wordSpanish": "Agua",
                "category": "naturaleza",
                "examples": ["Entsa yumi", "segundo"],
                "image": null,
                "imageDescription": ""
            },
            "createdAt": "2024-05-01T10:00:00Z"
        });

        let c: Contribution = serde_json::from_value(value).unwrap();
        assert_eq!(c.id, "42");
        assert_eq!(c.user_id.as_deref(), Some("7"));
        assert_eq!(c.kind(), ContributionType::Dictionary);
        assert_eq!(c.data.primary_text(), "Entsa");
        match &c.data {
            ContributionData::Dictionary(word) => {
                assert_eq!(word.canonical_example(), Some("Entsa yumi"))
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_decodes_story_contribution_with_spanish_title_key() {
        let value = json!({
            "_id": "s1",
            "type": "story",
            "status": "approved",
            "data": {
                "title_shuar": "Etsa",
                "title_español": "El sol",
                "author": "Nanki",
                "contentShuar": "...",
                "contentSpanish": "..."
            },
            "createdAt": 1714557600000i64,
            "resolvedAt": "2024-05-02 09:00:00"
        });

        let c: Contribution = serde_json::from_value(value).unwrap();
        assert_eq!(c.status, ContributionStatus::Approved);
        assert_eq!(c.data.secondary_text(), "El sol");
        assert!(c.resolved_at.is_some());
    }

    #[test]
    fn test_list_skips_undecodable_records() {
        let list: ContributionList = serde_json::from_value(json!([
            {"id": "c1", "type": "dictionary", "data": {"wordShuar": "Nase"}, "createdAt": 1},
            {"id": "c2", "type": "story", "data": {"title_shuar": "Etsa"}, "createdAt": null},
            {"id": 3, "type": "poema", "data": {}, "createdAt": 1},
            {"id": "c4", "type": "dictionary", "data": {"wordShuar": "Yawa"}, "createdAt": 2}
        ]))
        .unwrap();

        let ids: Vec<_> = list.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c4"]);
        let skipped: Vec<_> = list.skipped.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(skipped, ["c2", "3"]);
    }

    #[test]
    fn test_user_accepts_both_naming_schemes() {
        let english: User = serde_json::from_value(json!({
            "id": "1", "email": "a@b.c", "firstName": "Ana", "lastName": "Uwi", "role": "ADMIN"
        }))
        .unwrap();
        let spanish: User = serde_json::from_value(json!({
            "_id": 1, "email": "a@b.c", "nombre": "Ana", "apellido": "Uwi", "rol": "ADMIN"
        }))
        .unwrap();

        assert_eq!(english, spanish);
        assert_eq!(english.full_name(), "Ana Uwi");
    }

    #[test]
    fn test_role_tags_are_case_insensitive() {
        assert_eq!(Role::from_tag("estudiante"), Some(Role::Student));
        assert_eq!(Role::from_tag(" ADMIN "), Some(Role::Admin));
        assert_eq!(Role::from_tag("PROFESOR"), None);
    }

    #[test]
    fn test_missing_publish_state_displays_as_published() {
        let lesson: Lesson = serde_json::from_value(json!({"id": "l1", "titleShuar": "Yus"})).unwrap();
        assert_eq!(lesson.status, None);
        assert_eq!(PublishState::display(lesson.status), "Publicado");
        assert_eq!(PublishState::display(Some(PublishState::Draft)), "Borrador");
    }
}
