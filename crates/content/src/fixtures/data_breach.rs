use trainer_core::model::{Choice, QuizQuestion, ScenarioDefinition, Step};

use super::options;

fn breach_notice(company: &str, date: &str, affected: &str, data: &[&str]) -> String {
    let items: String = data.iter().map(|item| format!("<li>{item}</li>")).collect();
    format!(
        "<div class=\"breach-notification\">\
         <h2>{company}</h2><p>Security Notice</p>\
         <p><strong>Date of Incident:</strong> {date}</p>\
         <p><strong>Affected Users:</strong> {affected}</p>\
         <h4>What Information Was Involved:</h4><ul>{items}</ul>\
         <h4>What You Should Do:</h4><p>We recommend changing your password immediately</p>\
         </div>"
    )
}

#[must_use]
pub fn definition() -> ScenarioDefinition {
    ScenarioDefinition::new(
        "Data Breach Response",
        "Learn how to handle personal data breaches",
    )
    .with_step(
        Step::new(
            "Breach Notification",
            breach_notice(
                "SecureShop Online",
                "March 15, 2024",
                "2.1 million users",
                &["Email addresses", "Encrypted passwords", "Names", "Phone numbers"],
            ),
        )
        .with_kind("notification")
        .with_choice(
            Choice::new("ignore_notification", "Ignore it - my password is strong enough", -20)
                .with_feedback(
                    "Even strong passwords should be changed after a breach. The encrypted data \
                     might be cracked over time.",
                )
                .with_education(
                    "Breaches expose your data to criminals who may have years to crack \
                     encryption or find other ways to exploit it.",
                ),
        )
        .with_choice(
            Choice::new("change_password_same", "Change password to a similar one", -5)
                .with_feedback(
                    "Using similar passwords doesn't provide good security. Use a completely \
                     different, strong password.",
                )
                .with_education(
                    "Password variations (like adding a number) are easily guessed by attackers \
                     who know your old password.",
                ),
        )
        .with_choice(
            Choice::new(
                "change_all_passwords",
                "Change this password and check other accounts",
                25,
            )
            .with_feedback(
                "Excellent! Changing the breached password and checking reused passwords across \
                 other sites is the best approach.",
            )
            .with_education(
                "Data breaches often lead to credential stuffing attacks where criminals try your \
                 leaked password on other sites.",
            ),
        )
        .with_choice(
            Choice::new(
                "enable_2fa",
                "Change password and enable two-factor authentication",
                30,
            )
            .with_feedback(
                "Perfect! This is the most comprehensive response. 2FA provides additional \
                 security even if passwords are compromised.",
            )
            .with_education(
                "Two-factor authentication adds a crucial second layer of security that's much \
                 harder for attackers to bypass.",
            ),
        ),
    )
    .with_step(
        Step::new(
            "Identity Monitoring",
            "<div class=\"monitoring-content\">\
             <h3>Identity Theft Protection</h3>\
             <ul><li>Monitor credit reports regularly</li>\
             <li>Watch bank and credit card statements</li>\
             <li>Set up account alerts for unusual activity</li>\
             <li>Check for unauthorized accounts opened in your name</li>\
             <li>Monitor social media for impersonation</li></ul></div>",
        )
        .with_kind("monitoring")
        .with_choice(
            Choice::new("no_monitoring", "I'll just be more careful with emails", -10)
                .with_feedback(
                    "Being careful with emails is good, but you need comprehensive monitoring \
                     after a breach.",
                )
                .with_education(
                    "Data breaches can lead to identity theft months or years later. Active \
                     monitoring is essential.",
                ),
        )
        .with_choice(
            Choice::new("basic_monitoring", "I'll check my bank statements monthly", 10)
                .with_feedback(
                    "Good start! Monthly monitoring is better than nothing, but consider more \
                     frequent checks.",
                )
                .with_education(
                    "The sooner you detect fraudulent activity, the easier it is to resolve and \
                     limit damage.",
                ),
        )
        .with_choice(
            Choice::new(
                "comprehensive_monitoring",
                "Set up alerts and check all accounts regularly",
                25,
            )
            .with_feedback(
                "Excellent! Comprehensive monitoring gives you the best chance of catching fraud \
                 early.",
            )
            .with_education(
                "Automated alerts can notify you of suspicious activity within hours instead of \
                 weeks or months.",
            ),
        )
        .with_choice(
            Choice::new("credit_freeze", "Freeze my credit reports with all bureaus", 30)
                .with_feedback(
                    "Outstanding! Credit freezes prevent new accounts from being opened in your \
                     name without your permission.",
                )
                .with_education(
                    "Credit freezes are free and one of the most effective ways to prevent \
                     identity theft after a breach.",
                ),
        ),
    )
    .with_step(
        Step::new(
            "Legal Rights and Actions",
            "<div class=\"legal-content\">\
             <h3>Your Rights After a Data Breach</h3>\
             <ul><li><strong>Right to Information</strong></li>\
             <li><strong>Right to Free Credit Monitoring</strong></li>\
             <li><strong>Right to Compensation</strong></li>\
             <li><strong>Right to Legal Action</strong></li></ul></div>",
        )
        .with_kind("legal")
        .with_choice(
            Choice::new("do_nothing_legal", "I don't want to deal with legal issues", 0)
                .with_feedback(
                    "That's understandable, but you should at least take advantage of free \
                     services offered by the company.",
                )
                .with_education(
                    "Even if you don't pursue legal action, accepting free credit monitoring and \
                     identity protection services costs nothing.",
                ),
        )
        .with_choice(
            Choice::new(
                "accept_free_services",
                "Accept free credit monitoring from the company",
                15,
            )
            .with_feedback(
                "Good choice! Free monitoring services can help detect problems early with no \
                 cost to you.",
            )
            .with_education(
                "Companies often provide free monitoring for 1-2 years after a breach. Take \
                 advantage of these services.",
            ),
        )
        .with_choice(
            Choice::new(
                "research_legal_options",
                "Research legal options and class-action lawsuits",
                20,
            )
            .with_feedback(
                "Smart approach! Understanding your legal rights helps you make informed decisions \
                 about potential compensation.",
            )
            .with_education(
                "Many data breach lawsuits result in settlements that provide additional \
                 monitoring services or monetary compensation.",
            ),
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What should you do first when you receive a data breach notification?",
            options(&[
                "Wait to see if you notice any problems",
                "Change your password immediately",
                "Delete the notification email",
                "Share the news on social media",
            ]),
            1,
        )
        .with_explanation(
            "Immediately changing your password reduces the window of opportunity for attackers \
             to use your compromised credentials.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What is a credit freeze?",
            options(&[
                "A temporary hold on your credit card",
                "A way to stop all credit monitoring",
                "A block preventing new credit accounts from being opened",
                "A method to improve your credit score",
            ]),
            2,
        )
        .with_explanation(
            "Credit freezes prevent creditors from accessing your credit report, making it nearly \
             impossible for identity thieves to open new accounts in your name.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "How long should you monitor for identity theft after a data breach?",
            options(&[
                "Just for the first month",
                "Until you receive the breach notification",
                "For at least 1-2 years, possibly longer",
                "Only if you notice suspicious activity",
            ]),
            2,
        )
        .with_explanation(
            "Identity thieves may wait months or years before using stolen data, so long-term \
             monitoring is essential for protection.",
        ),
    )
}
