//! Route wrapper that enforces an access [`Policy`] before rendering.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use session::{Decision, Policy};

use crate::state::session::SessionContext;
use crate::util::auth::{replace_options, requested_location};

/// Render `children` only when the guard allows the current location.
///
/// Re-evaluated from the persisted session on every navigation; denied
/// visits are redirected with history replacement and never flash the page.
#[component]
pub fn Guarded(policy: Policy, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let location = use_location();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);

    Effect::new(move || {
        let requested = requested_location(&location.pathname.get(), &location.search.get());
        match session.check(&policy, &requested) {
            Decision::Render => allowed.set(true),
            decision @ Decision::Redirect { .. } => {
                allowed.set(false);
                if let Some(target) = decision.target() {
                    navigate(&target, replace_options());
                }
            }
        }
    });

    view! {
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}
