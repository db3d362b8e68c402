//! Prompt templates for description and caption generation
//!
//! The guide text is product copy as much as it is code; editing it
//! changes caption quality, so keep wording changes deliberate.

use crate::types::{CaptionLength, Tone};

/// Prompt sent with an image to obtain a detailed description
pub(crate) const DESCRIBE_IMAGE: &str = "\
Analyze this image in detail. Consider:
1. Main subjects/people
2. Actions/activities
3. Setting/location
4. Mood/atmosphere
5. Colors and visual elements
6. Any text or significant details";

/// Build the caption generation prompt from the content description
/// and style parameters
pub(crate) fn caption_prompt(
    content_description: &str,
    tone: Tone,
    length: CaptionLength,
    hashtag_count: u8,
) -> String {
    let tone_upper = tone.to_string().to_uppercase();
    let examples = tone_examples(tone)
        .iter()
        .map(|example| format!("- {example}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on this content:\n{content_description}\n\n\
         Generate 5 unique {tone_upper} captions that sound natural and engaging.\n\n\
         Tone Style: {style}\n\n\
         Here are examples of the tone to match:\n{examples}\n\n\
         Requirements:\n\
         1. Match the natural style of the example captions above\n\
         2. Include exactly {hashtag_count} relevant hashtags at the end\n\
         3. Keep length {length} ({length_guide})\n\
         4. Use appropriate emojis where they feel natural\n\
         5. Make each caption unique and engaging\n\
         6. For friendly tone, include engaging questions\n\
         7. For humorous tone, include witty observations\n\
         8. For formal tone, maintain professionalism\n\n\
         Format each caption like this:\n\
         \u{2022} [Natural caption with emojis if appropriate] #Hashtag1 #Hashtag2 ...",
        style = tone_style(tone),
        length_guide = length_guide(length),
    )
}

fn tone_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => {
            "Polished, respectful, and business-like. Focus on professionalism and clear communication."
        }
        Tone::Casual => "Relaxed, conversational, and relatable. Use light emojis and everyday language.",
        Tone::Professional => {
            "Inspiring, empowering, and goal-oriented. Focus on achievement and growth."
        }
        Tone::Friendly => {
            "Warm, engaging, and community-oriented. Encourage interaction and build connection."
        }
        Tone::Humorous => "Playful, witty, and fun. Use creative wordplay and appropriate emojis.",
    }
}

fn tone_examples(tone: Tone) -> [&'static str; 3] {
    match tone {
        Tone::Formal => [
            "This serene landscape showcases the beauty of nature's harmony.",
            "An extraordinary event that highlights collaboration and shared success.",
            "A timeless architectural marvel, exemplifying elegance and precision.",
        ],
        Tone::Casual => [
            "Weekend vibes: A little coffee, a little sunshine, and a lot of good energy! ☀️☕",
            "Just me, my favorite book, and the sound of rain. Couldn't ask for more 🌧️📚",
            "When life gives you sunsets, you just sit back and enjoy 🌅",
        ],
        Tone::Professional => [
            "Breaking barriers and building a legacy – one step at a time. 💼",
            "Success begins with a vision and grows through persistence and teamwork.",
            "Shaping the future by embracing challenges and fostering innovation.",
        ],
        Tone::Friendly => [
            "Sharing this little slice of joy with you all! What's bringing you happiness today? 💛",
            "This place has a piece of my heart ❤️ What's your favorite escape spot? 🌍",
            "Moments like these are best enjoyed with friends. Who would you bring here? 👫",
        ],
        Tone::Humorous => [
            "When life gives you lemons, trade them for pizza 🍕✨ Priorities, am I right?",
            "Caught mid-dance move... The floor wasn't ready for my talent 💃🔥",
            "If at first you don't succeed, order dessert and call it a win 🍰🎉",
        ],
    }
}

fn length_guide(length: CaptionLength) -> &'static str {
    match length {
        CaptionLength::Short => "Keep captions between 50-80 characters",
        CaptionLength::Medium => "Keep captions between 120-150 characters",
        CaptionLength::Long => "Keep captions between 200-250 characters",
    }
}
