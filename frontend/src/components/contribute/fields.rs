//! 贡献表单的字段渲染
//!
//! 每个输入框直接读写 `ComposerState` 里的草稿，校验错误在字段下方内联显示。

use super::Composer;
use crate::state::SignalCell;
use crate::web::file::{read_data_url, selected_file};
use chicham::contribution::{ComposerState, FormField};
use chicham_shared::ContributionType;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn label(field: FormField) -> &'static str {
    match field {
        FormField::PalabraShuar => "Palabra en Shuar",
        FormField::TraduccionEspanol => "Traducción al español",
        FormField::Categoria => "Categoría",
        FormField::Ejemplo => "Ejemplo de uso",
        FormField::Imagen => "Imagen (opcional)",
        FormField::DescripcionImagen => "Descripción de la imagen",
        FormField::TituloShuar => "Título en Shuar",
        FormField::TituloEspanol => "Título en español",
        FormField::Autor => "Autor",
        FormField::CategoriaCuento => "Categoría",
        FormField::ContenidoShuar => "Contenido en Shuar",
        FormField::ContenidoEspanol => "Contenido en español",
        FormField::Portada => "Portada (opcional)",
        FormField::DescripcionPortada => "Descripción de la portada",
    }
}

fn is_required(kind: ContributionType, field: FormField) -> bool {
    FormField::required_for(kind).contains(&field)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Control {
    Text,
    TextArea,
    Image,
}

#[component]
fn DraftField(
    composer: Composer,
    state: SignalCell<ComposerState>,
    field: FormField,
    control: Control,
) -> impl IntoView {
    let name = field.name();
    let value = move || state.with(|s| s.draft.value(field).to_string());
    let error = move || state.with(|s| s.draft.error_for(field).map(str::to_string));
    let marker = if is_required(field.kind(), field) { " *" } else { "" };

    let input = match control {
        Control::Text => {
            let composer = composer.clone();
            view! {
                <input
                    id=name
                    type="text"
                    class=move || if error().is_some() { "input input-bordered input-error w-full" } else { "input input-bordered w-full" }
                    prop:value=value
                    on:input=move |ev| composer.set_field(field, event_target_value(&ev))
                />
            }
            .into_any()
        }
        Control::TextArea => {
            let composer = composer.clone();
            view! {
                <textarea
                    id=name
                    rows="6"
                    class=move || if error().is_some() { "textarea textarea-bordered textarea-error w-full" } else { "textarea textarea-bordered w-full" }
                    prop:value=value
                    on:input=move |ev| composer.set_field(field, event_target_value(&ev))
                ></textarea>
            }
            .into_any()
        }
        Control::Image => {
            let picker = composer.clone();
            let clearer = composer.clone();
            view! {
                <div class="flex items-center gap-4">
                    <input
                        id=name
                        type="file"
                        accept="image/*"
                        class="file-input file-input-bordered w-full"
                        on:change=move |ev| {
                            let Some(file) = selected_file(&ev) else { return };
                            let composer = picker.clone();
                            spawn_local(async move {
                                if let Some(data_url) = read_data_url(file).await {
                                    composer.set_field(field, data_url);
                                }
                            });
                        }
                    />
                    <Show when=move || !value().is_empty()>
                        <img src=value class="h-16 w-16 rounded object-cover" />
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm"
                            on:click={
                                let clearer = clearer.clone();
                                move |_| clearer.set_field(field, "")
                            }
                        >
                            "Quitar"
                        </button>
                    </Show>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="form-control">
            <label for=name class="label">
                <span class="label-text">{label(field)}{marker}</span>
            </label>
            {input}
            <Show when=move || error().is_some()>
                <span class="label-text-alt text-error mt-1">{move || error().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}

/// 词汇字段
#[component]
pub fn WordSection(composer: Composer, state: SignalCell<ComposerState>) -> impl IntoView {
    view! {
        <div class="grid md:grid-cols-2 gap-4">
            <DraftField composer=composer.clone() state=state field=FormField::PalabraShuar control=Control::Text />
            <DraftField composer=composer.clone() state=state field=FormField::TraduccionEspanol control=Control::Text />
        </div>
        <DraftField composer=composer.clone() state=state field=FormField::Categoria control=Control::Text />
        <DraftField composer=composer.clone() state=state field=FormField::Ejemplo control=Control::TextArea />
        <DraftField composer=composer.clone() state=state field=FormField::Imagen control=Control::Image />
        <DraftField composer=composer state=state field=FormField::DescripcionImagen control=Control::Text />
    }
}

/// 故事字段
#[component]
pub fn StorySection(composer: Composer, state: SignalCell<ComposerState>) -> impl IntoView {
    view! {
        <div class="grid md:grid-cols-2 gap-4">
            <DraftField composer=composer.clone() state=state field=FormField::TituloShuar control=Control::Text />
            <DraftField composer=composer.clone() state=state field=FormField::TituloEspanol control=Control::Text />
        </div>
        <div class="grid md:grid-cols-2 gap-4">
            <DraftField composer=composer.clone() state=state field=FormField::Autor control=Control::Text />
            <DraftField composer=composer.clone() state=state field=FormField::CategoriaCuento control=Control::Text />
        </div>
        <DraftField composer=composer.clone() state=state field=FormField::ContenidoShuar control=Control::TextArea />
        <DraftField composer=composer.clone() state=state field=FormField::ContenidoEspanol control=Control::TextArea />
        <DraftField composer=composer.clone() state=state field=FormField::Portada control=Control::Image />
        <DraftField composer=composer state=state field=FormField::DescripcionPortada control=Control::Text />
    }
}
