use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The closed set of copywriting frameworks the prompt understands.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    Aida,
    Pas,
    #[value(alias = "bab")]
    BeforeAfterBridge,
    Fab,
    #[value(name = "4us", alias = "4u's")]
    FourUs,
    Slap,
}

pub const ALL: [Framework; 6] = [
    Framework::Aida,
    Framework::Pas,
    Framework::BeforeAfterBridge,
    Framework::Fab,
    Framework::FourUs,
    Framework::Slap,
];

impl Framework {
    /// Canonical name as it appears in prompts and in model replies.
    pub fn name(&self) -> &'static str {
        match self {
            Framework::Aida => "AIDA",
            Framework::Pas => "PAS",
            Framework::BeforeAfterBridge => "Before-After-Bridge",
            Framework::Fab => "FAB",
            Framework::FourUs => "4U's",
            Framework::Slap => "SLAP",
        }
    }

    /// Exact lookup by canonical name. Anything outside the closed set maps
    /// to None, which downstream treats as "no framework chosen".
    pub fn from_name(name: &str) -> Option<Framework> {
        ALL.into_iter().find(|f| f.name() == name)
    }

    /// Find a canonical framework name anywhere inside free model text.
    /// Containment rather than exact match: the selection prompt asks for a
    /// bare name, but models pad replies with wording like "I'd recommend
    /// PAS." and that tolerance is intentional.
    pub fn match_in_text(text: &str) -> Option<Framework> {
        ALL.into_iter().find(|f| text.contains(f.name()))
    }

    /// Stage-by-stage guidance injected into the master prompt. One directive
    /// per funnel stage, each naming the element of the acronym that governs
    /// that stage's creative angle.
    pub fn instructions(&self) -> &'static str {
        match self {
            Framework::Aida => AIDA_INSTRUCTIONS,
            Framework::Pas => PAS_INSTRUCTIONS,
            Framework::BeforeAfterBridge => BAB_INSTRUCTIONS,
            Framework::Fab => FAB_INSTRUCTIONS,
            Framework::FourUs => FOUR_US_INSTRUCTIONS,
            Framework::Slap => SLAP_INSTRUCTIONS,
        }
    }

    /// One-line pitch shown in the framework guide.
    pub fn tagline(&self) -> &'static str {
        match self {
            Framework::Aida => "Grab attention, then gradually build desire. The classic path to persuade a customer step by step.",
            Framework::Pas => "Present the Problem, Agitate it, then offer the Solution. A very emotional framework focusing on 'pain'.",
            Framework::BeforeAfterBridge => "Picture the before and after states, presenting the product as the bridge between them. Focuses on the transformation story.",
            Framework::Fab => "Show Features, practical Advantages, then the real Benefits. A logical and rational framework.",
            Framework::FourUs => "Useful, Urgent, Unique, Ultra-specific. A quick, direct framework for grabbing immediate attention.",
            Framework::Slap => "Stop, Look, Act, Purchase. Walks the viewer from a scroll-stop to the sale in four beats.",
        }
    }

    pub fn use_case(&self) -> &'static str {
        match self {
            Framework::Aida => "Most products and services. Ideal for campaigns starting from scratch with a new audience.",
            Framework::Pas => "Services that solve clear and painful problems.",
            Framework::BeforeAfterBridge => "Products and services that change a person's life or habits.",
            Framework::Fab => "Technical or complex products, SaaS, and B2B services.",
            Framework::FourUs => "Headlines, short video ads (Reels/TikTok), and viral content.",
            Framework::Slap => "Fast-paced ads where the offer and the sale sit close together.",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            Framework::Aida => "Launching a new clothing brand, marketing an apartment.",
            Framework::Pas => "Psychological counseling, acne treatment product, debt relief program.",
            Framework::BeforeAfterBridge => "A weight loss fitness program, training courses for a career change.",
            Framework::Fab => "A new smartphone, computer software, a car.",
            Framework::FourUs => "An ad for a flash sale.",
            Framework::Slap => "A short video showcasing an exciting feature.",
        }
    }
}

/// Contract used by the prompt builder: unknown or empty names fall back to
/// empty guidance, deliberately not an error.
pub fn instructions_for(name: &str) -> &'static str {
    match Framework::from_name(name) {
        Some(f) => f.instructions(),
        None => "",
    }
}

const AIDA_INSTRUCTIONS: &str = r#"### Framework: AIDA (Attention, Interest, Desire, Action)
- **For the Awareness stage:** Focus exclusively on grabbing **Attention (A)**. Your goal is to be disruptive and stop the user.
- **For the Engagement stage:** Focus on building **Interest (I)**. Provide value, tell a story, and make them curious to learn more.
- **For the Consideration stage:** Focus on creating intense **Desire (D)**. Showcase the benefits, use social proof, and make the product irresistible.
- **For the Conversion stage:** Focus 100% on driving **Action (A)**. The CTA must be powerful, clear, and direct.
- **For the Retention stage:** Reinforce the value of their **Action** and build loyalty.
"#;

const PAS_INSTRUCTIONS: &str = r#"### Framework: PAS (Problem, Agitate, Solve)
- **For the Awareness stage:** Focus exclusively on the **Problem (P)**. Define it clearly and make the audience aware of a pain point they have.
- **For the Engagement stage:** Shift focus to **Agitate (A)** the problem. Describe the negative consequences of not solving it. Make them feel the pain.
- **For the Consideration stage:** Continue to **Agitate (A)**, but begin to hint at a way out. Build the tension and the need for a solution.
- **For the Conversion stage:** Focus 100% on presenting your product as the definitive **Solution (S)**. Show how it resolves the agitated problem perfectly.
- **For the Retention stage:** Remind them how your **Solution (S)** has improved their lives.
"#;

const BAB_INSTRUCTIONS: &str = r#"### Framework: Before-After-Bridge
- **For the Awareness stage:** Focus exclusively on the **'Before'** state. Paint a vivid, painful, and relatable picture of the user's world with the problem.
- **For the Engagement stage:** Continue detailing the **'Before'** state, but start contrasting it with hints of a better future.
- **For the Consideration stage:** Focus entirely on the **'After'** state. Describe the ideal, aspirational world the user will live in after solving the problem. Create a strong craving for this result.
- **For the Conversion stage:** Position the product as the **'Bridge'**. Explain clearly how it is the only vehicle to get them from their painful 'Before' to their desired 'After'.
- **For the Retention stage:** Celebrate their arrival in the **'After'** state, thanks to your 'Bridge'.
"#;

const FAB_INSTRUCTIONS: &str = r#"### Framework: FAB (Features, Advantages, Benefits)
- **For the Awareness stage:** Lead with the most powerful and surprising **Benefit (B)**. Don't explain how, just show the amazing result to create curiosity.
- **For the Engagement stage:** Explain the **Advantage (A)** your product has that delivers this benefit. Why is your way better?
- **For the Consideration stage:** Detail the specific **Features (F)** that create the advantage. This is for the logical brain, providing proof.
- **For the Conversion stage:** Return to the **Benefits (B)**. Connect every feature and advantage back to a tangible, emotional gain for the user. Answer "What's in it for me?".
- **For the Retention stage:** Highlight advanced **Features (F)** or new **Benefits (B)** to ensure they get maximum value.
"#;

const FOUR_US_INSTRUCTIONS: &str = r#"### Framework: 4U's (Useful, Urgent, Unique, Ultra-specific)
- **For the Awareness stage:** Focus on being **Unique** and **Useful**. Why is this different, and why should they care?
- **For the Engagement stage:** Focus on being **Useful** and **Ultra-specific**. Provide tangible value and concrete details.
- **For the Consideration stage:** Focus on being **Unique** and **Ultra-specific**. Prove with specifics why you are the best choice over competitors.
- **For the Conversion stage:** Focus on being **Urgent** and **Ultra-specific**. Create a clear, compelling, time-sensitive reason to act NOW.
- **For the Retention stage:** Provide **Useful** and **Unique** content to reinforce the value of their decision and build community.
"#;

const SLAP_INSTRUCTIONS: &str = r#"### Framework: SLAP (Stop, Look, Act, Purchase)
- **For the Awareness stage:** Your only goal is to make them **Stop** scrolling. Use a visually arresting image or a shocking headline.
- **For the Engagement stage:** Now that you have their attention, make them **Look**. Draw them in with intriguing copy that explains the big idea.
- **For the Consideration stage:** Drive a preliminary, low-commitment **Act**. Examples: 'Download a free guide', 'Watch a demo', 'Take a quiz'.
- **For the Conversion stage:** Drive the final **Purchase**. The offer and CTA must be direct and focused on the sale.
- **For the Retention stage:** Encourage another **Act** (e.g., leave a review, join the community) or a repeat **Purchase**.
"#;
