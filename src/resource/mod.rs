//! 管理端内容资源（课程、词典、故事）
//!
//! 三种资源共享同一套控制器，差异全部由 `CrudResource` 声明：
//! 接口前缀、分页记忆的视图名、表单字段与必填项。

pub mod controller;
pub mod draft;
pub mod pagination;

pub use controller::{ResourceController, ResourceState};
pub use draft::ResourceDraft;
pub use pagination::{PageSettings, PaginationMemory};

use crate::error::FieldError;
use chicham_shared::{DictionaryEntry, Lesson, PublishState, Story};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 资源接口的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl CrudOp {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CrudOp::List => "list",
            CrudOp::Get => "get",
            CrudOp::Create => "create",
            CrudOp::Update => "update",
            CrudOp::Delete => "delete",
        }
    }
}

/// 表单控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextArea,
    /// 每行一项，对应字符串数组
    Lines,
    /// data URL
    Image,
}

/// 表单字段声明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 线上字段名
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, input: InputKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        required: false,
    }
}

const fn required(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input: InputKind::Text,
        required: true,
    }
}

pub trait CrudResource:
    Serialize + DeserializeOwned + Clone + Default + PartialEq + 'static
{
    /// 接口前缀，例如 `api/lessons`
    const BASE: &'static str;
    /// 分页记忆使用的视图名
    const VIEW: &'static str;
    /// 界面上的单数名称
    const LABEL: &'static str;
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn subtitle(&self) -> &str;
    fn category(&self) -> &str;

    fn status(&self) -> Option<PublishState> {
        None
    }

    fn endpoint(op: CrudOp) -> String {
        format!("{}/{}", Self::BASE, op.as_str())
    }

    /// 必填字段检查
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors = ResourceDraft::from_item(self).missing(Self::FIELDS);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl CrudResource for Lesson {
    const BASE: &'static str = "api/lessons";
    const VIEW: &'static str = "lecciones";
    const LABEL: &'static str = "Lección";
    const FIELDS: &'static [FieldSpec] = &[
        required("titleShuar", "Título en Shuar"),
        required("titleSpanish", "Título en español"),
        required("category", "Categoría"),
        field("level", "Nivel", InputKind::Text),
        field("description", "Descripción", InputKind::TextArea),
        field("content", "Contenido", InputKind::TextArea),
        field("image", "Imagen", InputKind::Image),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title_shuar
    }

    fn subtitle(&self) -> &str {
        &self.title_spanish
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn status(&self) -> Option<PublishState> {
        self.status
    }
}

impl CrudResource for DictionaryEntry {
    const BASE: &'static str = "api/dictionary";
    const VIEW: &'static str = "diccionario";
    const LABEL: &'static str = "Palabra";
    const FIELDS: &'static [FieldSpec] = &[
        required("wordShuar", "Palabra en Shuar"),
        required("wordSpanish", "Traducción al español"),
        required("category", "Categoría"),
        field("examples", "Ejemplos (uno por línea)", InputKind::Lines),
        field("image", "Imagen", InputKind::Image),
        field("imageDescription", "Descripción de la imagen", InputKind::Text),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.content.word_shuar
    }

    fn subtitle(&self) -> &str {
        &self.content.word_spanish
    }

    fn category(&self) -> &str {
        &self.content.category
    }
}

impl CrudResource for Story {
    const BASE: &'static str = "api/stories";
    const VIEW: &'static str = "cuentos";
    const LABEL: &'static str = "Cuento";
    const FIELDS: &'static [FieldSpec] = &[
        required("title_shuar", "Título en Shuar"),
        required("title_español", "Título en español"),
        required("author", "Autor"),
        field("category", "Categoría", InputKind::Text),
        field("contentShuar", "Contenido en Shuar", InputKind::TextArea),
        field("contentSpanish", "Contenido en español", InputKind::TextArea),
        field("coverImage", "Portada", InputKind::Image),
        field("imageDescription", "Descripción de la portada", InputKind::Text),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.content.title_shuar
    }

    fn subtitle(&self) -> &str {
        &self.content.title_spanish
    }

    fn category(&self) -> &str {
        &self.content.category
    }

    fn status(&self) -> Option<PublishState> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(errors: Vec<FieldError>) -> Vec<&'static str> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Lesson::endpoint(CrudOp::List), "api/lessons/list");
        assert_eq!(DictionaryEntry::endpoint(CrudOp::Update), "api/dictionary/update");
        assert_eq!(Story::endpoint(CrudOp::Delete), "api/stories/delete");
    }

    #[test]
    fn test_required_fields_per_resource() {
        assert_eq!(
            names(Lesson::default().validate().unwrap_err()),
            ["titleShuar", "titleSpanish", "category"]
        );
        assert_eq!(
            names(DictionaryEntry::default().validate().unwrap_err()),
            ["wordShuar", "wordSpanish", "category"]
        );
        assert_eq!(
            names(Story::default().validate().unwrap_err()),
            ["title_shuar", "title_español", "author"]
        );
    }

    #[test]
    fn test_complete_lesson_is_valid() {
        let lesson = Lesson {
            title_shuar: "Yamaram".into(),
            title_spanish: "Saludos".into(),
            category: "básico".into(),
            ..Lesson::default()
        };
        assert!(lesson.validate().is_ok());
    }

    #[test]
    fn test_every_field_spec_is_a_wire_key() {
        fn check<T: CrudResource>() {
            let mut item = T::default();
            let mut draft = ResourceDraft::from_item(&item);
            for spec in T::FIELDS {
                let value = match spec.input {
                    InputKind::Image => "data:image/png;base64,AA",
                    _ => "x",
                };
                draft.set(spec, value);
            }
            item = draft.to_item().unwrap();
            let round = ResourceDraft::from_item(&item);
            for spec in T::FIELDS {
                assert!(!round.text(spec.name).is_empty(), "{} lost", spec.name);
            }
        }
        check::<Lesson>();
        check::<DictionaryEntry>();
        check::<Story>();
    }
}
