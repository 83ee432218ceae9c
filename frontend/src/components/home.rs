use crate::session::use_session;
use crate::web::router::Link;
use chicham::policy;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let landing = move || {
        session
            .state()
            .user
            .map(|user| policy::landing_route(&user.role))
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-lg space-y-6">
                    <h1 class="text-5xl font-bold text-primary">"Chicham"</h1>
                    <p class="text-lg text-base-content/70">
                        "Aprende Shuar con lecciones, un diccionario vivo y cuentos de nuestra comunidad."
                    </p>
                    {move || match landing() {
                        Some(path) => view! {
                            <Link to=path class="btn btn-primary">"Ir a mi panel"</Link>
                        }.into_any(),
                        None => view! {
                            <div class="flex justify-center gap-4">
                                <Link to="/login" class="btn btn-primary">"Iniciar sesión"</Link>
                                <Link to="/registro" class="btn btn-outline">"Crear cuenta"</Link>
                            </div>
                        }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
