use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ONBOARDING_STEPS: &[OnboardingStep] = &[
    OnboardingStep {
        title: "Create your first webinar",
        description: "Pick a title, a date and the audience you want to reach.",
    },
    OnboardingStep {
        title: "Upload your media",
        description: "Add slides, intro videos and thumbnails. Files stay private until you share them.",
    },
    OnboardingStep {
        title: "Choose an AI voice assistant",
        description: "Select one of your configured assistants to host Q&A and follow-ups.",
    },
    OnboardingStep {
        title: "Set up payments",
        description: "Connect checkout so attendees can buy tickets for paid sessions.",
    },
];
