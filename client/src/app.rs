//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::{Policy, SessionStore};

use crate::components::{guarded::Guarded, navbar::Navbar};
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::types::Role;
use crate::pages::{
    admin::AdminDashboard,
    available::AvailableFoodPage,
    claims::MyClaimsPage,
    donation_form::{AddDonationPage, EditDonationPage},
    donor::DonorDashboard,
    landing::LandingPage,
    login::LoginPage,
    password::{ForgotPasswordPage, ResetPasswordPage},
    profile::ProfilePage,
    signup::SignupPage,
};
use crate::state::session::SessionContext;
use crate::util::storage::BrowserStorage;

/// Root application component.
///
/// Loads the persisted session once, shares its bearer header with the API
/// client, and declares the access policy of every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let session = SessionContext::new(SessionStore::new(BrowserStorage, Default::default()));
    provide_context(ApiClient::new(&config, session.auth_header()));
    provide_context(session);

    view! {
        <Title text="FoodShare"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("available") view=AvailableFoodPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>

                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <Guarded policy=Policy::PublicOnly><LoginPage/></Guarded> }
                    />
                    <Route
                        path=StaticSegment("signup")
                        view=|| view! { <Guarded policy=Policy::PublicOnly><SignupPage/></Guarded> }
                    />

                    <Route
                        path=StaticSegment("donor")
                        view=|| view! { <Guarded policy=Policy::roles([Role::Donor])><DonorDashboard/></Guarded> }
                    />
                    <Route
                        path=StaticSegment("donate")
                        view=|| view! { <Guarded policy=Policy::roles([Role::Donor])><AddDonationPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("edit-donation"), ParamSegment("id"))
                        view=|| view! { <Guarded policy=Policy::roles([Role::Donor])><EditDonationPage/></Guarded> }
                    />
                    <Route path=StaticSegment("charity") view=|| view! { <Redirect path="/my-claims"/> }/>
                    <Route
                        path=StaticSegment("my-claims")
                        view=|| {
                            view! {
                                <Guarded policy=Policy::roles([Role::Charity, Role::Individual])>
                                    <MyClaimsPage/>
                                </Guarded>
                            }
                        }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <Guarded policy=Policy::roles([Role::Admin])><AdminDashboard/></Guarded> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <Guarded policy=Policy::Open><ProfilePage/></Guarded> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
