//! Plain-text rendering of reports and alerts for chat webhooks.
//!
//! Output uses Slack-style `*bold*` markup. Times are shown in the reporting
//! timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotwatch_domain::{AlertEvent, AlertKind, AnalysisReport};

const RULE: &str = "--------------------";

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

fn short_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%d/%m %H:%M").to_string()
}

/// Daily summary sent to the report channel.
pub fn daily_report(report: &AnalysisReport, tz: Tz) -> String {
    let person = report.person_name.as_str();
    let mut out = String::new();

    push_line(&mut out, "*Daily meeting report*");
    push_line(&mut out, report.timestamp.with_timezone(&tz).format("%d %B %Y, %A").to_string());
    push_line(&mut out, format!("*{person}*"));
    push_line(&mut out, RULE);
    push_line(&mut out, format!("Scheduled: {}", report.total));
    push_line(&mut out, format!("On time: {}", report.on_time));
    push_line(&mut out, format!("Late: {}", report.late));
    push_line(&mut out, format!("No participation: {}", report.no_participation));
    push_line(&mut out, format!("Not started: {}", report.not_started));
    push_line(&mut out, RULE);
    push_line(&mut out, format!("*Performance: {}%*", report.performance_score));

    if !report.late_details.is_empty() {
        push_line(&mut out, "\n*Late meetings:*");
        for (i, detail) in report.late_details.iter().enumerate() {
            push_line(&mut out, format!("{}. *LATE* - {person} - {}", i + 1, detail.name));
            push_line(&mut out, format!("   Scheduled: {}", short_time(detail.scheduled_at, tz)));
            push_line(&mut out, format!("   Delay: {} minutes", detail.delay_minutes));
            push_line(&mut out, format!("   Participants: {}\n", detail.participants.join(", ")));
        }
    }

    if !report.no_participation_details.is_empty() {
        push_line(&mut out, "\n*No participation:*");
        for (i, detail) in report.no_participation_details.iter().enumerate() {
            push_line(&mut out, format!("{}. *NO PARTICIPATION* - {person} - {}", i + 1, detail.name));
            push_line(&mut out, format!("   Scheduled: {}", short_time(detail.scheduled_at, tz)));
            push_line(&mut out, format!("   Only: {}\n", detail.participants.join(", ")));
        }
    }

    if !report.not_started_details.is_empty() {
        push_line(&mut out, "\n*Not started:*");
        for (i, detail) in report.not_started_details.iter().enumerate() {
            push_line(&mut out, format!("{}. *NOT STARTED* - {person} - {}", i + 1, detail.name));
            push_line(&mut out, format!("   Scheduled: {}\n", short_time(detail.scheduled_at, tz)));
        }
    }

    out
}

/// Batch of per-meeting alerts for the alert channel. `None` when empty.
pub fn critical_alerts(alerts: &[AlertEvent]) -> Option<String> {
    if alerts.is_empty() {
        return None;
    }

    let mut out = String::from("*Critical alerts*\n\n");
    for (i, alert) in alerts.iter().enumerate() {
        let n = i + 1;
        let meeting = alert.meeting_name.as_deref().unwrap_or("-");
        let person = alert.person_name.as_str();
        match alert.kind {
            AlertKind::Late => {
                push_line(&mut out, format!("{n}. *LATE* - {person} - {meeting}"));
                if let Some(delay) = alert.delay_minutes {
                    push_line(&mut out, format!("   Delay: {delay} minutes"));
                }
            }
            AlertKind::NoParticipation => {
                push_line(&mut out, format!("{n}. *NO PARTICIPATION* - {person} - {meeting}"));
            }
            AlertKind::NotStarted => {
                push_line(&mut out, format!("{n}. *NOT STARTED* - {person} - {meeting}"));
            }
            AlertKind::LowPerformance => {
                push_line(&mut out, format!("{n}. {}", alert.message));
            }
        }
        out.push('\n');
    }

    Some(out)
}

pub fn performance_warning(alert: &AlertEvent, score: u8) -> String {
    format!("*Performance warning*\n{}: daily performance score is critical: *{score}%*", alert.person_name)
}
