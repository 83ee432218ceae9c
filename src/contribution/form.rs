//! 贡献表单状态
//!
//! 将词汇与故事两套字段整合到同一个 `ContributionDraft` 中，负责：
//! - 字段的读写
//! - 切换类型时的整体清空
//! - 必填校验
//! - 表单到请求对象的转换

use crate::error::FieldError;
use crate::notice::{DialogContent, Tone};
use chicham_shared::protocol::CreateContributionRequest;
use chicham_shared::{ContributionData, ContributionType, DictionaryContent, StoryContent};

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    // 词汇
    PalabraShuar,
    TraduccionEspanol,
    Categoria,
    Ejemplo,
    Imagen,
    DescripcionImagen,
    // 故事
    TituloShuar,
    TituloEspanol,
    Autor,
    CategoriaCuento,
    ContenidoShuar,
    ContenidoEspanol,
    Portada,
    DescripcionPortada,
}

const WORD_REQUIRED: &[FormField] = &[
    FormField::PalabraShuar,
    FormField::TraduccionEspanol,
    FormField::Categoria,
];

const STORY_REQUIRED: &[FormField] = &[
    FormField::TituloShuar,
    FormField::TituloEspanol,
    FormField::Autor,
    FormField::ContenidoShuar,
    FormField::ContenidoEspanol,
];

impl FormField {
    /// 表单控件的 name 属性
    pub const fn name(&self) -> &'static str {
        match self {
            FormField::PalabraShuar => "palabraShuar",
            FormField::TraduccionEspanol => "traduccionEspanol",
            FormField::Categoria => "categoria",
            FormField::Ejemplo => "ejemplo",
            FormField::Imagen => "imagen",
            FormField::DescripcionImagen => "descripcionImagen",
            FormField::TituloShuar => "tituloShuar",
            FormField::TituloEspanol => "tituloEspanol",
            FormField::Autor => "autor",
            FormField::CategoriaCuento => "categoriaCuento",
            FormField::ContenidoShuar => "contenidoShuar",
            FormField::ContenidoEspanol => "contenidoEspanol",
            FormField::Portada => "portada",
            FormField::DescripcionPortada => "descripcionPortada",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "palabraShuar" => FormField::PalabraShuar,
            "traduccionEspanol" => FormField::TraduccionEspanol,
            "categoria" => FormField::Categoria,
            "ejemplo" => FormField::Ejemplo,
            "imagen" => FormField::Imagen,
            "descripcionImagen" => FormField::DescripcionImagen,
            "tituloShuar" => FormField::TituloShuar,
            "tituloEspanol" => FormField::TituloEspanol,
            "autor" => FormField::Autor,
            "categoriaCuento" => FormField::CategoriaCuento,
            "contenidoShuar" => FormField::ContenidoShuar,
            "contenidoEspanol" => FormField::ContenidoEspanol,
            "portada" => FormField::Portada,
            "descripcionPortada" => FormField::DescripcionPortada,
            _ => return None,
        };
        Some(field)
    }

    /// 字段所属的贡献类型
    pub const fn kind(&self) -> ContributionType {
        match self {
            FormField::PalabraShuar
            | FormField::TraduccionEspanol
            | FormField::Categoria
            | FormField::Ejemplo
            | FormField::Imagen
            | FormField::DescripcionImagen => ContributionType::Dictionary,
            _ => ContributionType::Story,
        }
    }

    pub fn required_for(kind: ContributionType) -> &'static [FormField] {
        match kind {
            ContributionType::Dictionary => WORD_REQUIRED,
            ContributionType::Story => STORY_REQUIRED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFields {
    pub palabra_shuar: String,
    pub traduccion_espanol: String,
    pub categoria: String,
    pub ejemplo: String,
    /// data URL
    pub imagen: Option<String>,
    pub descripcion_imagen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFields {
    pub titulo_shuar: String,
    pub titulo_espanol: String,
    pub autor: String,
    pub categoria_cuento: String,
    pub contenido_shuar: String,
    pub contenido_espanol: String,
    /// data URL
    pub portada: Option<String>,
    pub descripcion_portada: String,
}

/// 贡献表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionDraft {
    pub kind: ContributionType,
    pub word: WordFields,
    pub story: StoryFields,
    pub errors: Vec<FieldError>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl ContributionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::PalabraShuar => &self.word.palabra_shuar,
            FormField::TraduccionEspanol => &self.word.traduccion_espanol,
            FormField::Categoria => &self.word.categoria,
            FormField::Ejemplo => &self.word.ejemplo,
            FormField::Imagen => self.word.imagen.as_deref().unwrap_or(""),
            FormField::DescripcionImagen => &self.word.descripcion_imagen,
            FormField::TituloShuar => &self.story.titulo_shuar,
            FormField::TituloEspanol => &self.story.titulo_espanol,
            FormField::Autor => &self.story.autor,
            FormField::CategoriaCuento => &self.story.categoria_cuento,
            FormField::ContenidoShuar => &self.story.contenido_shuar,
            FormField::ContenidoEspanol => &self.story.contenido_espanol,
            FormField::Portada => self.story.portada.as_deref().unwrap_or(""),
            FormField::DescripcionPortada => &self.story.descripcion_portada,
        }
    }

    /// 写入字段，同时清除该字段的错误提示
    ///
    /// 图片字段传入空字符串表示移除附件。
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::PalabraShuar => self.word.palabra_shuar = value,
            FormField::TraduccionEspanol => self.word.traduccion_espanol = value,
            FormField::Categoria => self.word.categoria = value,
            FormField::Ejemplo => self.word.ejemplo = value,
            FormField::Imagen => self.word.imagen = non_empty(value),
            FormField::DescripcionImagen => self.word.descripcion_imagen = value,
            FormField::TituloShuar => self.story.titulo_shuar = value,
            FormField::TituloEspanol => self.story.titulo_espanol = value,
            FormField::Autor => self.story.autor = value,
            FormField::CategoriaCuento => self.story.categoria_cuento = value,
            FormField::ContenidoShuar => self.story.contenido_shuar = value,
            FormField::ContenidoEspanol => self.story.contenido_espanol = value,
            FormField::Portada => self.story.portada = non_empty(value),
            FormField::DescripcionPortada => self.story.descripcion_portada = value,
        }
        let name = field.name();
        self.errors.retain(|e| e.field != name);
    }

    /// 切换类型：两套字段和所有错误一并清空
    pub fn switch_type(&mut self, kind: ContributionType) {
        *self = Self {
            kind,
            ..Self::default()
        };
    }

    /// 清空所有字段与错误，保留当前类型
    pub fn reset(&mut self) {
        self.switch_type(self.kind);
    }

    /// 校验当前类型的必填字段，结果写入 `errors`
    pub fn validate(&mut self) -> bool {
        self.errors = FormField::required_for(self.kind)
            .iter()
            .filter(|field| self.value(**field).trim().is_empty())
            .map(|field| FieldError::required(field.name()))
            .collect();
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        let name = field.name();
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    /// 当前类型的主要字段（词汇为 Shuar 单词，故事为 Shuar 标题）
    pub fn headline(&self) -> &str {
        match self.kind {
            ContributionType::Dictionary => self.word.palabra_shuar.trim(),
            ContributionType::Story => self.story.titulo_shuar.trim(),
        }
    }

    pub fn content(&self) -> ContributionData {
        match self.kind {
            ContributionType::Dictionary => {
                let w = &self.word;
                let ejemplo = w.ejemplo.trim();
                ContributionData::Dictionary(DictionaryContent {
                    word_shuar: w.palabra_shuar.trim().to_string(),
                    word_spanish: w.traduccion_espanol.trim().to_string(),
                    category: w.categoria.trim().to_string(),
                    examples: if ejemplo.is_empty() {
                        Vec::new()
                    } else {
                        vec![ejemplo.to_string()]
                    },
                    image: w.imagen.clone(),
                    image_description: w.descripcion_imagen.trim().to_string(),
                })
            }
            ContributionType::Story => {
                let s = &self.story;
                ContributionData::Story(StoryContent {
                    title_shuar: s.titulo_shuar.trim().to_string(),
                    title_spanish: s.titulo_espanol.trim().to_string(),
                    author: s.autor.trim().to_string(),
                    category: s.categoria_cuento.trim().to_string(),
                    content_shuar: s.contenido_shuar.clone(),
                    content_spanish: s.contenido_espanol.clone(),
                    cover_image: s.portada.clone(),
                    image_description: s.descripcion_portada.trim().to_string(),
                })
            }
        }
    }

    /// 将表单转换为 API 请求对象
    pub fn to_request(&self, user_id: Option<String>) -> CreateContributionRequest {
        CreateContributionRequest {
            kind: self.kind,
            user_id,
            content: self.content(),
        }
    }

    /// 提交前的确认对话框
    pub fn confirmation(&self) -> DialogContent {
        let message = match self.kind {
            ContributionType::Dictionary => format!(
                "¿Deseas enviar la palabra \"{}\" para su revisión?",
                self.headline()
            ),
            ContributionType::Story => format!(
                "¿Deseas enviar el cuento \"{}\" para su revisión?",
                self.headline()
            ),
        };
        DialogContent {
            title: "Confirmar contribución".to_string(),
            message,
            confirm_label: "Enviar".to_string(),
            tone: Tone::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WORD_FIELDS: &[FormField] = &[
        FormField::PalabraShuar,
        FormField::TraduccionEspanol,
        FormField::Categoria,
        FormField::Ejemplo,
        FormField::Imagen,
        FormField::DescripcionImagen,
    ];

    const STORY_FIELDS: &[FormField] = &[
        FormField::TituloShuar,
        FormField::TituloEspanol,
        FormField::Autor,
        FormField::CategoriaCuento,
        FormField::ContenidoShuar,
        FormField::ContenidoEspanol,
        FormField::Portada,
        FormField::DescripcionPortada,
    ];

    fn fully_filled(kind: ContributionType) -> ContributionDraft {
        let mut draft = ContributionDraft::new();
        draft.switch_type(kind);
        for field in WORD_FIELDS.iter().chain(STORY_FIELDS) {
            draft.set_field(*field, format!("valor-{}", field.name()));
        }
        // 两套字段都有内容，另外留下一条错误
        draft.errors.push(FieldError::required("autor"));
        draft
    }

    #[test]
    fn test_switching_type_clears_everything_in_both_directions() {
        for (from, to) in [
            (ContributionType::Dictionary, ContributionType::Story),
            (ContributionType::Story, ContributionType::Dictionary),
        ] {
            let mut draft = fully_filled(from);
            draft.switch_type(to);

            assert_eq!(draft.kind, to);
            assert_eq!(draft.word, WordFields::default());
            assert_eq!(draft.story, StoryFields::default());
            assert!(draft.errors.is_empty());
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in WORD_FIELDS.iter().chain(STORY_FIELDS) {
            assert_eq!(FormField::from_name(field.name()), Some(*field));
        }
        assert_eq!(FormField::from_name("desconocido"), None);
        assert_eq!(FormField::Portada.kind(), ContributionType::Story);
    }

    #[test]
    fn test_validation_only_checks_active_type() {
        let mut draft = ContributionDraft::new();
        draft.set_field(FormField::TituloShuar, "Etsa");
        assert!(!draft.validate());
        assert_eq!(draft.errors.len(), 3);
        assert!(draft.error_for(FormField::Categoria).is_some());

        draft.switch_type(ContributionType::Story);
        assert!(!draft.validate());
        assert_eq!(draft.errors.len(), 5);
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut draft = ContributionDraft::new();
        draft.validate();
        draft.set_field(FormField::PalabraShuar, "Nase");
        assert!(draft.error_for(FormField::PalabraShuar).is_none());
        assert!(draft.error_for(FormField::Categoria).is_some());
    }

    #[test]
    fn test_whitespace_does_not_satisfy_required() {
        let mut draft = ContributionDraft::new();
        draft.set_field(FormField::PalabraShuar, "   ");
        draft.set_field(FormField::TraduccionEspanol, "Agua");
        draft.set_field(FormField::Categoria, "naturaleza");
        assert!(!draft.validate());
        assert_eq!(draft.errors[0].field, "palabraShuar");
    }

    #[test]
    fn test_word_payload_shape() {
        let mut draft = ContributionDraft::new();
        draft.set_field(FormField::PalabraShuar, "Entsa");
        draft.set_field(FormField::TraduccionEspanol, "Agua");
        draft.set_field(FormField::Categoria, "animales");
        draft.set_field(FormField::Ejemplo, "Entsa yumiri");

        let body = serde_json::to_value(draft.to_request(Some("5".into()))).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "dictionary",
                "userId": "5",
                "content": {
                    "wordShuar": "Entsa",
                    "wordSpanish": "Agua",
                    "category": "animales",
                    "examples": ["Entsa yumiri"],
                    "image": null,
                    "imageDescription": ""
                }
            })
        );
    }

    #[test]
    fn test_story_payload_uses_story_keys() {
        let mut draft = ContributionDraft::new();
        draft.switch_type(ContributionType::Story);
        draft.set_field(FormField::TituloShuar, "Etsa");
        draft.set_field(FormField::TituloEspanol, "El sol");
        draft.set_field(FormField::Portada, "data:image/png;base64,AAAA");

        let body = serde_json::to_value(draft.to_request(None)).unwrap();
        assert_eq!(body["type"], "story");
        assert!(body.get("userId").is_none());
        assert_eq!(body["content"]["title_español"], "El sol");
        assert_eq!(body["content"]["coverImage"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_confirmation_names_the_content() {
        let mut draft = ContributionDraft::new();
        draft.set_field(FormField::PalabraShuar, "Entsa");
        assert!(draft.confirmation().message.contains("palabra"));

        draft.switch_type(ContributionType::Story);
        assert!(draft.confirmation().message.contains("cuento"));
    }

    #[test]
    fn test_reset_keeps_active_type() {
        let mut draft = fully_filled(ContributionType::Story);
        draft.reset();
        assert_eq!(draft.kind, ContributionType::Story);
        assert_eq!(draft.word, WordFields::default());
        assert_eq!(draft.story, StoryFields::default());
    }
}
