//! Folds classified meetings into an [`AnalysisReport`].

use chrono::{DateTime, Utc};
use slotwatch_domain::constants::EMPTY_RUN_SCORE;
use slotwatch_domain::{
    AnalysisReport, LateDetail, MeetingStatus, NoParticipationDetail, NotStartedDetail,
};

use super::alerts;
use crate::reconciliation::Reconciliation;

/// `round(on_time / total * 100)`, and 100 for an empty run.
pub fn performance_score(on_time: usize, total: usize) -> u8 {
    if total == 0 {
        return EMPTY_RUN_SCORE;
    }
    let on_time = on_time.min(total);
    // Integer half-up rounding of on_time * 100 / total.
    let score = (on_time * 200 + total) / (total * 2);
    u8::try_from(score).unwrap_or(EMPTY_RUN_SCORE)
}

pub fn build_report(
    reconciliation: Reconciliation,
    person_key: &str,
    person_name: &str,
    timestamp: DateTime<Utc>,
) -> AnalysisReport {
    let Reconciliation { meetings, alerts: critical_alerts, participant_errors } = reconciliation;

    let mut report = AnalysisReport {
        timestamp,
        person_key: person_key.to_owned(),
        person_name: person_name.to_owned(),
        total: meetings.len(),
        on_time: 0,
        late: 0,
        no_participation: 0,
        not_started: 0,
        performance_score: EMPTY_RUN_SCORE,
        details: Vec::new(),
        late_details: Vec::new(),
        no_participation_details: Vec::new(),
        not_started_details: Vec::new(),
        critical_alerts,
        performance_alert: None,
        source_errors: participant_errors,
    };

    for meeting in &meetings {
        let name = meeting.meeting.name.clone();
        let scheduled_at = meeting.meeting.scheduled_at;
        match meeting.status {
            MeetingStatus::OnTime => report.on_time += 1,
            MeetingStatus::Late => {
                report.late += 1;
                report.late_details.push(LateDetail {
                    name,
                    scheduled_at,
                    delay_minutes: meeting.delay_minutes.unwrap_or_default(),
                    participants: meeting.participants.clone(),
                });
            }
            MeetingStatus::NoParticipation => {
                report.no_participation += 1;
                report.no_participation_details.push(NoParticipationDetail {
                    name,
                    scheduled_at,
                    participants: meeting.participants.clone(),
                });
            }
            MeetingStatus::NotStarted => {
                report.not_started += 1;
                report.not_started_details.push(NotStartedDetail { name, scheduled_at });
            }
            MeetingStatus::Scheduled => {}
        }
    }

    report.details = meetings;
    report.performance_score = performance_score(report.on_time, report.total);
    report.performance_alert = alerts::performance_alert(person_name, report.performance_score);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_scores_one_hundred() {
        assert_eq!(performance_score(0, 0), 100);
    }

    #[test]
    fn seven_of_ten_scores_seventy() {
        assert_eq!(performance_score(7, 10), 70);
    }

    #[test]
    fn score_rounds_half_up() {
        assert_eq!(performance_score(1, 3), 33);
        assert_eq!(performance_score(2, 3), 67);
        assert_eq!(performance_score(1, 8), 13); // 12.5
        assert_eq!(performance_score(1, 200), 1); // 0.5
    }

    #[test]
    fn score_stays_in_range() {
        for total in 1..=40 {
            for on_time in 0..=total {
                let score = performance_score(on_time, total);
                assert!(score <= 100);
            }
        }
        assert_eq!(performance_score(5, 5), 100);
    }

    #[test]
    fn empty_reconciliation_builds_clean_report() {
        let report = build_report(Reconciliation::default(), "ada", "Ada", Utc::now());
        assert_eq!(report.total, 0);
        assert_eq!(report.performance_score, 100);
        assert!(report.performance_alert.is_none());
        assert!(report.critical_alerts.is_empty());
    }
}
