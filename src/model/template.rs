//! Built-in resume template.

use super::{Block, HeadingLevel, Paragraph};

/// Default block sequence for a new resume.
pub fn resume_template() -> Vec<Block> {
    vec![
        Block::heading("Your Name", HeadingLevel::One),
        Block::paragraph("Job Title | City, Country"),
        Block::heading("Contact", HeadingLevel::Two),
        Block::paragraph("you@example.com • 555-0100 • LinkedIn • GitHub"),
        Block::heading("Experience", HeadingLevel::Two),
        Block::Paragraph(Paragraph::new(
            "Company Name — Jan 2020 - Present\n\
             **Role Title**\n\
             • Describe an achievement with a measurable result\n\
             • Describe a responsibility you owned",
        )),
        Block::heading("Projects", HeadingLevel::Two),
        Block::paragraph(
            "Project Name | Role\n\
             Project Link\n\
             Tools Used: Rust, TypeScript\n\
             - Summarize what the project does",
        ),
        Block::heading("Education", HeadingLevel::Two),
        Block::paragraph("University Name — 2016 - 2020\nDegree, Field of Study"),
        Block::heading("Skills", HeadingLevel::Two),
        Block::paragraph("**Languages:** Rust, Python\n**Tools:** Git, Docker"),
    ]
}
