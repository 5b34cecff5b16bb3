//! Synthesizes an email body from a subject when no explicit body was spoken.

const SICK_KEYWORDS: &[&str] = &["sick", "illness", "health", "leave", "unwell"];
const MEETING_KEYWORDS: &[&str] = &["meeting", "appointment", "discussion", "conference"];
const FOLLOW_UP_KEYWORDS: &[&str] = &["follow", "update", "check"];

const SICK_BODY: &str = "\
Dear Sir/Madam,

I am writing to inform you that I will be unable to attend work today due to illness. I expect to return once I have recovered.

I will monitor my email and respond to urgent matters as my health permits.

Thank you for your understanding.

Best regards";

/// Picks a body template from the subject text. The keyword groups are tested
/// in a fixed order (sick-leave, meeting, follow-up, generic) because subjects
/// can match more than one group; the first group wins.
pub fn generate_body(subject: &str) -> String {
    let folded = subject.to_lowercase();

    if SICK_KEYWORDS.iter().any(|k| folded.contains(k)) {
        return SICK_BODY.to_string();
    }

    if MEETING_KEYWORDS.iter().any(|k| folded.contains(k)) {
        return format!(
            "\
Dear Recipient,

I hope this email finds you well. I am writing to discuss the {subject}.

I would appreciate the opportunity to meet and discuss this matter further. Please let me know your availability.

Best regards"
        );
    }

    if FOLLOW_UP_KEYWORDS.iter().any(|k| folded.contains(k)) {
        return format!(
            "\
Dear Recipient,

I hope you are doing well. I wanted to follow up on our previous discussion regarding {subject}.

Please let me know if you need any additional information or if there are any updates.

Looking forward to your response.

Best regards"
        );
    }

    format!(
        "\
Dear Recipient,

I hope this email finds you well. I am writing regarding {subject}.

Please let me know if you need any additional information.

Best regards"
    )
}
