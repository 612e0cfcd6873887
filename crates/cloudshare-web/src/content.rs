//! Marketing Copy and Display Helpers

use cloudshare_core::{Banner, CreditBalance};

pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        icon: "☁️",
        title: "Easy File Upload",
        description: "Drag and drop files of any type and have them stored safely in seconds.",
    },
    Feature {
        icon: "🔒",
        title: "Secure Storage",
        description: "Files are stored privately by default. You decide what becomes public.",
    },
    Feature {
        icon: "🔗",
        title: "Simple Sharing",
        description: "Share any public file with a single link, no account needed to download.",
    },
    Feature {
        icon: "💳",
        title: "Pay As You Go",
        description: "Buy credits only when you need them. One credit, one upload.",
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Ananya Rao",
        role: "Freelance Designer",
        quote: "Sending large design files to clients used to be a chore. Now it is one link.",
    },
    Testimonial {
        name: "Marcus Lee",
        role: "Startup Founder",
        quote: "Credits keep our costs predictable. We pay for exactly what the team uploads.",
    },
    Testimonial {
        name: "Priya Menon",
        role: "Teacher",
        quote: "My students get their study material instantly and I never worry about storage.",
    },
];

/// CSS classes for the feedback banner
pub const fn banner_class(banner: &Banner) -> &'static str {
    match banner {
        Banner::None => "banner",
        Banner::Success(_) => "banner banner-success",
        Banner::Error(_) => "banner banner-error",
    }
}

/// Line under the balance card
pub fn upload_hint(balance: CreditBalance) -> String {
    format!("You can upload {balance} more files with your current credits.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_classes() {
        assert_eq!(banner_class(&Banner::Error("x".into())), "banner banner-error");
        assert_eq!(banner_class(&Banner::Success("x".into())), "banner banner-success");
    }

    #[test]
    fn test_upload_hint() {
        assert_eq!(
            upload_hint(CreditBalance::new(505)),
            "You can upload 505 more files with your current credits."
        );
    }
}
