use crate::api::use_app;
use crate::web::router::{Link, use_navigate};
use chicham::account::{self, RegisterForm};
use chicham::{AppError, FieldError, Notice, Notifier};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 单个输入框及其内联错误
#[component]
fn RegisterInput(
    form: RwSignal<RegisterForm>,
    errors: RwSignal<Vec<FieldError>>,
    field: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    read: fn(&RegisterForm) -> String,
    write: fn(&mut RegisterForm, String),
) -> impl IntoView {
    let error = move || {
        errors.with(|list| {
            list.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    };

    view! {
        <div class="form-control">
            <label class="label" for=field>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=field
                type=kind
                class=move || if error().is_some() { "input input-bordered input-error" } else { "input input-bordered" }
                prop:value=move || form.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| write(f, value));
                    errors.update(|list| list.retain(|e| e.field != field));
                }
            />
            <Show when=move || error().is_some()>
                <span class="label-text-alt text-error mt-1">{move || error().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(found) = current.validate() {
            errors.set(found);
            return;
        }

        set_is_submitting.set(true);
        let api = app.api.clone();
        let toaster = app.toaster;
        let navigate = navigate.clone();
        spawn_local(async move {
            match account::register(&api, &current).await {
                Ok(()) => {
                    toaster.notify(Notice::success("Cuenta creada, ya puedes iniciar sesión"));
                    navigate("/login");
                }
                Err(AppError::Validation(found)) => errors.set(found),
                Err(e) => toaster.notify(Notice::error(e.user_message())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <h1 class="text-3xl font-bold text-primary">"Crear cuenta"</h1>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="grid grid-cols-2 gap-4">
                            <RegisterInput form=form errors=errors field="firstName" label="Nombre"
                                read=|f| f.first_name.clone() write=|f, v| f.first_name = v />
                            <RegisterInput form=form errors=errors field="lastName" label="Apellido"
                                read=|f| f.last_name.clone() write=|f, v| f.last_name = v />
                        </div>
                        <RegisterInput form=form errors=errors field="email" label="Correo electrónico" kind="email"
                            read=|f| f.email.clone() write=|f, v| f.email = v />
                        <RegisterInput form=form errors=errors field="password" label="Contraseña" kind="password"
                            read=|f| f.password.clone() write=|f, v| f.password = v />
                        <RegisterInput form=form errors=errors field="confirmPassword" label="Confirmar contraseña" kind="password"
                            read=|f| f.confirm_password.clone() write=|f, v| f.confirm_password = v />
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creando..." }.into_any()
                                } else {
                                    "Registrarme".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿Ya tienes cuenta? "
                            <Link to="/login" class="link link-primary">"Inicia sesión"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
