use crate::api::use_app;
use crate::session::use_session;
use crate::web::identity::sign_in_with_google;
use crate::web::router::{Link, use_navigate};
use chicham_shared::protocol::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = app.api.clone();
        let store = session.store.clone();
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if is_submitting.get_untracked() {
                return;
            }
            set_is_submitting.set(true);
            set_error_msg.set(None);

            let credentials = LoginRequest {
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
            };
            let api = api.clone();
            let store = store.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match store.authenticate(&api, &credentials).await {
                    Ok(landing) => navigate(landing),
                    Err(e) => set_error_msg.set(Some(e.user_message())),
                }
                set_is_submitting.set(false);
            });
        }
    };

    let google = app.config.identity.clone().map(|identity| {
        let api = app.api.clone();
        let store = session.store.clone();
        let navigate = navigate.clone();
        let on_google = move |_: leptos::ev::MouseEvent| {
            set_is_submitting.set(true);
            set_error_msg.set(None);
            let identity = identity.clone();
            let api = api.clone();
            let store = store.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let outcome = match sign_in_with_google(&identity).await {
                    Ok(id_token) => store
                        .authenticate_google(&api, id_token)
                        .await
                        .map_err(|e| e.user_message()),
                    Err(detail) => {
                        tracing::warn!(detail, "google sign-in aborted");
                        Err("No se pudo iniciar sesión con Google".to_string())
                    }
                };
                match outcome {
                    Ok(landing) => navigate(landing),
                    Err(message) => set_error_msg.set(Some(message)),
                }
                set_is_submitting.set(false);
            });
        };
        view! {
            <div class="divider">"o"</div>
            <button
                type="button"
                class="btn btn-outline w-full"
                disabled=move || is_submitting.get()
                on:click=on_google
            >
                "Continuar con Google"
            </button>
        }
    });

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold text-primary">"Chicham"</h1>
                    <p class="text-base-content/70">"Ingresa para continuar aprendiendo"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Correo electrónico"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="nombre@correo.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Ingresando..." }.into_any()
                                } else {
                                    "Iniciar sesión".into_any()
                                }}
                            </button>
                        </div>
                        {google}
                        <p class="text-sm text-center mt-2">
                            "¿No tienes cuenta? "
                            <Link to="/registro" class="link link-primary">"Regístrate"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
