use trainer_core::model::{Choice, QuizQuestion, ScenarioDefinition, Step};

use super::options;

fn system_window(title: &str, message: &str, warning: &str, critical: bool) -> String {
    let class = if critical { "system-error" } else { "system-warning" };
    format!(
        "<div class=\"system-interface\">\
         <div class=\"system-header\">{title}</div>\
         <div class=\"{class}\"><h3>{message}</h3><p class=\"warning-text\">{warning}</p></div>\
         </div>"
    )
}

#[must_use]
pub fn definition() -> ScenarioDefinition {
    ScenarioDefinition::new(
        "Ransomware Attack Simulation",
        "Learn how to respond to ransomware threats",
    )
    .with_step(
        Step::new(
            "Suspicious Download Warning",
            system_window(
                "File Download",
                "You've received an email with an attachment: 'Invoice_2024_URGENT.exe'",
                "Your antivirus has flagged this file as potentially dangerous.",
                false,
            ),
        )
        .with_kind("system")
        .with_choice(
            Choice::new("download_anyway", "Download anyway - I need to see the invoice", -25)
                .with_feedback(
                    "Downloading suspicious executable files is extremely dangerous! This could \
                     be ransomware.",
                )
                .with_education(
                    "Never download files flagged by antivirus, especially executable files \
                     (.exe) from unknown sources.",
                ),
        )
        .with_choice(
            Choice::new("scan_first", "Run additional antivirus scan on the file", 15)
                .with_feedback(
                    "Good thinking! Always scan suspicious files, but be aware that some \
                     malware can evade detection.",
                )
                .with_education(
                    "Multiple security layers provide better protection than relying on a \
                     single antivirus solution.",
                ),
        )
        .with_choice(
            Choice::new("delete_file", "Delete the file immediately", 20)
                .with_feedback(
                    "Excellent choice! When antivirus flags a file as dangerous, it's best to \
                     delete it immediately.",
                )
                .with_education(
                    "Trust your security software's warnings - it's better to be safe than sorry.",
                ),
        )
        .with_choice(
            Choice::new("contact_sender", "Contact the sender to verify the file", 10)
                .with_feedback(
                    "Good instinct to verify, but be careful - the sender's email might be \
                     compromised.",
                )
                .with_education(
                    "Always verify through a separate communication channel, not by replying \
                     to the suspicious email.",
                ),
        ),
    )
    .with_step(
        Step::new(
            "Ransomware Attack in Progress",
            system_window(
                "SYSTEM COMPROMISED",
                "Your files are being encrypted!",
                "Ransomware detected: All your files will be encrypted unless you pay $500 in \
                 Bitcoin within 24 hours.",
                true,
            ),
        )
        .with_kind("system")
        .with_choice(
            Choice::new("pay_ransom", "Pay the ransom to get my files back", -30)
                .with_feedback(
                    "Never pay ransoms! There's no guarantee you'll get your files back, and it \
                     funds criminal activity.",
                )
                .with_education(
                    "Paying ransom encourages more attacks and doesn't guarantee file recovery. \
                     Many victims never get their files back even after paying.",
                ),
        )
        .with_choice(
            Choice::new("disconnect_network", "Immediately disconnect from the network", 25)
                .with_feedback(
                    "Excellent! Disconnecting prevents the ransomware from spreading to other \
                     systems and encrypting network drives.",
                )
                .with_education(
                    "Quick isolation is crucial to limit damage. Disconnect ethernet cables and \
                     turn off Wi-Fi immediately.",
                ),
        )
        .with_choice(
            Choice::new("restart_computer", "Restart the computer to stop the attack", -5)
                .with_feedback(
                    "Restarting might stop the current process, but the malware will likely \
                     resume when you restart.",
                )
                .with_education(
                    "Ransomware often survives restarts and may continue encryption. \
                     Professional removal is needed.",
                ),
        )
        .with_choice(
            Choice::new("call_it_support", "Call IT support immediately", 20)
                .with_feedback(
                    "Good choice! Professional IT support can help contain the attack and begin \
                     recovery procedures.",
                )
                .with_education(
                    "Incident response should involve IT professionals who can properly assess \
                     and contain the threat.",
                ),
        ),
    )
    .with_step(
        Step::new(
            "Recovery Planning",
            "<div class=\"recovery-content\">\
             <h3>Post-Attack Recovery Steps</h3>\
             <ol><li>Isolate affected systems</li><li>Assess damage scope</li>\
             <li>Check backup availability</li><li>Remove malware completely</li>\
             <li>Restore from clean backups</li><li>Update security measures</li></ol></div>",
        )
        .with_kind("recovery")
        .with_choice(
            Choice::new("restore_backup", "Restore files from yesterday's backup", 25)
                .with_feedback(
                    "Perfect! Regular backups are your best defense against ransomware. This is \
                     why backup strategies are crucial.",
                )
                .with_education(
                    "Follow the 3-2-1 rule: 3 copies of important data, on 2 different media \
                     types, with 1 copy stored offsite.",
                ),
        )
        .with_choice(
            Choice::new("no_backup", "We don't have recent backups", -10)
                .with_feedback(
                    "This highlights the importance of regular backups. Without them, recovery \
                     becomes much more difficult.",
                )
                .with_education(
                    "Implement automated daily backups and test them regularly to ensure they \
                     work when needed.",
                ),
        ),
    )
    .with_step(
        Step::new(
            "Prevention Education",
            "<div class=\"education-content\">\
             <h3>Ransomware Prevention Best Practices</h3>\
             <ul><li>Regular Backups</li><li>Keep Software Updated</li><li>Email Vigilance</li>\
             <li>Network Segmentation</li><li>Employee Training</li>\
             <li>Incident Response Plan</li></ul></div>",
        )
        .with_kind("education")
        .with_choice(
            Choice::new("implement_plan", "I'll implement these security measures", 15)
                .with_feedback(
                    "Excellent commitment to cybersecurity! Proactive measures are the best \
                     defense against ransomware.",
                )
                .with_education(
                    "Create a checklist and timeline to implement these measures systematically \
                     in your organization.",
                ),
        )
        .with_choice(
            Choice::new("need_help", "I need help implementing these measures", 10)
                .with_feedback(
                    "Smart to recognize when you need assistance! Consider consulting with IT \
                     security professionals.",
                )
                .with_education(
                    "Many organizations benefit from working with cybersecurity consultants to \
                     develop comprehensive protection strategies.",
                ),
        )
        .with_choice(
            Choice::new("already_protected", "We already have most of these in place", 20)
                .with_feedback(
                    "Great! Regular review and testing of security measures ensures they remain \
                     effective.",
                )
                .with_education(
                    "Even with good security in place, regular audits and updates are essential \
                     as threats evolve.",
                ),
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What should you do first when you discover a ransomware attack is in progress?",
            options(&[
                "Pay the ransom immediately to minimize damage",
                "Disconnect the infected system from the network",
                "Try to delete the ransomware manually",
                "Restart the computer multiple times",
            ]),
            1,
        )
        .with_explanation(
            "Immediate network isolation prevents ransomware from spreading to other systems and \
             encrypting shared network drives.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What is the best defense against ransomware?",
            options(&[
                "Having comprehensive cyber insurance",
                "Using the latest antivirus software",
                "Maintaining regular, tested backups",
                "Never opening email attachments",
            ]),
            2,
        )
        .with_explanation(
            "While all options help, regular backups are the most effective way to recover from \
             ransomware without paying criminals.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "Why should you never pay ransomware demands?",
            options(&[
                "It's too expensive for most people",
                "There's no guarantee you'll get your files back",
                "It's technically difficult to pay in Bitcoin",
                "Your antivirus will block the payment",
            ]),
            1,
        )
        .with_explanation(
            "Many victims never receive decryption keys even after payment, and paying funds \
             criminal operations and encourages more attacks.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "What does the '3-2-1 backup rule' mean?",
            options(&[
                "3 antivirus programs, 2 firewalls, 1 backup",
                "3 copies of data, 2 different media types, 1 offsite copy",
                "Back up 3 times daily, 2 times weekly, 1 time monthly",
                "3 years of backups, 2 verification checks, 1 restore test",
            ]),
            1,
        )
        .with_explanation(
            "The 3-2-1 rule ensures data protection through multiple copies stored in different \
             locations and formats.",
        ),
    )
    .with_quiz_question(
        QuizQuestion::new(
            "How often should organizations test their backup and recovery procedures?",
            options(&[
                "Only when a disaster occurs",
                "Once per year during annual reviews",
                "Quarterly or bi-annually with documented results",
                "Only when implementing new backup systems",
            ]),
            2,
        )
        .with_explanation(
            "Regular testing ensures backups are working properly and recovery procedures can be \
             executed quickly during an actual incident.",
        ),
    )
}
