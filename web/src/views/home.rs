//! Landing page: hero, plan cards, and the scratch-to-reveal offer.

use dioxus::prelude::*;
use ui::{Navbar, ScratchCard};

use crate::content::{HERO_TAGLINE, HERO_TITLE, PLANS};

#[component]
pub fn Home() -> Element {
    let mut discount_unlocked = use_signal(|| false);

    rsx! {
        Navbar {}

        section { class: "hero",
            h1 { "{HERO_TITLE}" }
            p { class: "hero-tagline", "{HERO_TAGLINE}" }
            a { class: "premium-button", href: "/signup", "Get started" }
        }

        section { class: "plans",
            h2 { "Featured plans" }
            div { class: "plan-grid",
                for plan in PLANS.iter() {
                    div { key: "{plan.name}", class: "plan-card",
                        h3 { "{plan.name}" }
                        p { class: "plan-price", "{plan.price}" }
                        p { class: "plan-blurb", "{plan.blurb}" }
                        ul {
                            for perk in plan.perks.iter() {
                                li { key: "{perk}", "{perk}" }
                            }
                        }
                    }
                }
            }
        }

        if discount_unlocked() {
            div { class: "reveal-banner",
                strong { "Congratulations! " }
                "You've unlocked a 20% discount!"
            }
        }

        ScratchCard { on_revealed: move |_| discount_unlocked.set(true) }
    }
}
