//! Static marketing content for the landing page.

pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    pub blurb: &'static str,
    pub perks: [&'static str; 3],
}

pub const HERO_TITLE: &str = "Fresh, balanced meals. Delivered daily.";
pub const HERO_TAGLINE: &str =
    "Home-style tiffins planned by nutritionists and cooked the same morning they reach you.";

pub const PLANS: [Plan; 3] = [
    Plan {
        name: "Maternity Plan",
        price: "₹4,500 / month",
        blurb: "Trimester-wise nutrition designed with prenatal dietitians.",
        perks: [
            "Iron and folate rich menus",
            "No fried or processed food",
            "Weekly menu consultation",
        ],
    },
    Plan {
        name: "Corporate Plan",
        price: "₹3,200 / month",
        blurb: "Office lunches that keep the afternoon slump away.",
        perks: [
            "Delivered to your desk",
            "Rotating regional menus",
            "Pause anytime you travel",
        ],
    },
    Plan {
        name: "Fitness & Keto Plan",
        price: "₹5,000 / month",
        blurb: "Macro-counted meals for training days and rest days.",
        perks: [
            "High-protein menu options",
            "Keto and low-carb variants",
            "Calorie counts on every box",
        ],
    },
];
