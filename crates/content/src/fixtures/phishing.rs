use trainer_core::model::{Choice, QuizQuestion, ScenarioDefinition, Step};

use super::options;

fn email(sender: &str, subject: &str, body: &str) -> String {
    format!(
        "<div class=\"email-interface\">\
         <div class=\"email-subject\">{subject}</div>\
         <div class=\"email-sender\">From: {sender}</div>\
         <div class=\"warning-badge\">Potential Spam</div>\
         <div class=\"email-body\">{body}</div></div>"
    )
}

#[must_use]
pub fn definition() -> ScenarioDefinition {
    ScenarioDefinition::new(
        "Email Phishing Detection",
        "Learn to identify and handle suspicious emails",
    )
    .with_step(
        Step::new(
            "Suspicious Email Alert",
            email(
                "security@youbank-alert.com",
                "URGENT: Account Security Alert - Verify Now!",
                "<p>Dear Valued Customer,</p>\
                 <p>We have detected unusual activity on your account. \
                 Your account will be suspended in 24 hours if not verified.</p>\
                 <p><a href=\"#\">https://youbank-security-verify.net/login</a></p>",
            ),
        )
        .with_kind("email")
        .with_choice(
            Choice::new("click_link", "Click the verification link immediately", -20)
                .with_feedback(
                    "This was a phishing attempt! The URL 'youbank-security-verify.net' is \
                     suspicious and doesn't match the official bank domain.",
                )
                .with_education(
                    "Always verify the sender's email domain and hover over links to check \
                     their destination before clicking.",
                )
                .detailed(),
        )
        .with_choice(
            Choice::new("call_bank", "Call the bank directly to verify", 25)
                .with_feedback(
                    "Excellent choice! Calling the bank directly is the safest way to verify \
                     if the email is legitimate.",
                )
                .with_education(
                    "When in doubt, always contact the organization through official channels \
                     listed on their website or your account statements.",
                ),
        )
        .with_choice(
            Choice::new("forward_email", "Forward to friends to warn them", -5)
                .with_feedback(
                    "While well-intentioned, forwarding suspicious emails can spread them \
                     further. Report to the bank instead.",
                )
                .with_education(
                    "Instead of forwarding, report suspicious emails to the organization's \
                     security team.",
                ),
        )
        .with_choice(
            Choice::new("ignore_email", "Delete the email and ignore it", 5)
                .with_feedback(
                    "Ignoring is better than clicking, but reporting it helps protect others too.",
                )
                .with_education(
                    "Deleting is safe, but reporting helps organizations track and prevent \
                     phishing attempts.",
                ),
        ),
    )
    .with_step(
        Step::new(
            "Email Analysis",
            "<div class=\"analysis-content\">\
             <h3>Let's analyze what made this email suspicious:</h3>\
             <ul class=\"red-flags\">\
             <li><strong>Suspicious Domain:</strong> \"youbank-alert.com\" instead of the official bank domain</li>\
             <li><strong>Urgency Tactics:</strong> \"24 hours\" deadline and emergency language</li>\
             <li><strong>Generic Greeting:</strong> \"Dear Valued Customer\" instead of your name</li>\
             <li><strong>Suspicious Link:</strong> Domain doesn't match the claimed sender</li>\
             </ul></div>",
        )
        .with_kind("analysis")
        .with_choice(
            Choice::new("understand", "I understand these warning signs", 5).with_feedback(
                "Great! Recognizing these patterns will help you identify future phishing \
                 attempts.",
            ),
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What is the most reliable way to verify a suspicious security email from your bank?",
            options(&[
                "Click the link to see if it looks legitimate",
                "Call the bank using the number from their official website",
                "Reply to the email asking for confirmation",
                "Forward it to friends for their opinion",
            ]),
            1,
        )
        .with_explanation(
            "Always contact organizations directly using official contact information to verify \
             suspicious communications.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "Which of these is typically a red flag in phishing emails?",
            options(&[
                "Personalized greeting with your full name",
                "Links to the organization's official website",
                "Urgent language demanding immediate action",
                "Professional email formatting",
            ]),
            2,
        )
        .with_explanation(
            "Phishing emails often create false urgency to pressure victims into making quick, \
             poor decisions.",
        ),
    )
}
