use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString};

/// Segments of the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum FormPane {
    #[default]
    Schedule,
    Details,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FormFields: u16 {
        const NAME = 1 << 0;
        const DATE_LABEL = 1 << 1;
        const DATE_PICKER = 1 << 2;
        const TIME_LABEL = 1 << 3;
        const CUSTOM_TIME_SWITCH = 1 << 4;
        const TIME_PICKER = 1 << 5;
        const TAGS_LABEL = 1 << 6;
        const TAGS_FIELD = 1 << 7;
        const NOTES_LABEL = 1 << 8;
        const NOTES_VIEW = 1 << 9;
        const SAVE = 1 << 10;

        const SCHEDULE = Self::DATE_LABEL.bits()
            | Self::DATE_PICKER.bits()
            | Self::TIME_LABEL.bits()
            | Self::CUSTOM_TIME_SWITCH.bits()
            | Self::TIME_PICKER.bits();
        const DETAILS = Self::TAGS_LABEL.bits()
            | Self::TAGS_FIELD.bits()
            | Self::NOTES_LABEL.bits()
            | Self::NOTES_VIEW.bits();
        const DATE_INPUTS = Self::DATE_PICKER.bits()
            | Self::CUSTOM_TIME_SWITCH.bits()
            | Self::TIME_PICKER.bits();
    }
}

/// Which form widgets are shown and which accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub pane: FormPane,
    pub visible: FormFields,
    pub enabled: FormFields,
}

impl FormLayout {
    pub fn for_pane(pane: FormPane, has_custom_time: bool, archived: bool) -> Self {
        let always = FormFields::NAME | FormFields::SAVE;
        let visible = match pane {
            FormPane::Schedule => {
                let mut fields = always | FormFields::SCHEDULE;
                if !has_custom_time {
                    fields.remove(FormFields::TIME_PICKER);
                }
                fields
            }
            FormPane::Details => always | FormFields::DETAILS,
        };
        let mut enabled = FormFields::all();
        if archived {
            enabled.remove(FormFields::DATE_INPUTS);
        }
        Self {
            pane,
            visible,
            enabled,
        }
    }

    pub fn is_visible(&self, field: FormFields) -> bool {
        self.visible.contains(field)
    }

    pub fn is_enabled(&self, field: FormFields) -> bool {
        self.enabled.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn schedule_pane_hides_time_picker_without_custom_time() {
        let layout = FormLayout::for_pane(FormPane::Schedule, false, false);
        assert!(layout.is_visible(FormFields::DATE_PICKER));
        assert!(layout.is_visible(FormFields::CUSTOM_TIME_SWITCH));
        assert!(!layout.is_visible(FormFields::TIME_PICKER));
        assert!(!layout.is_visible(FormFields::TAGS_FIELD));

        let layout = FormLayout::for_pane(FormPane::Schedule, true, false);
        assert!(layout.is_visible(FormFields::TIME_PICKER));
    }

    #[test]
    fn details_pane_hides_every_schedule_widget() {
        let layout = FormLayout::for_pane(FormPane::Details, true, false);
        assert!(layout.visible.intersection(FormFields::SCHEDULE).is_empty());
        assert!(layout.visible.contains(FormFields::DETAILS));
        assert!(layout.is_visible(FormFields::NAME));
    }

    #[test]
    fn archived_events_lock_date_inputs() {
        let layout = FormLayout::for_pane(FormPane::Schedule, true, true);
        assert!(!layout.is_enabled(FormFields::DATE_PICKER));
        assert!(!layout.is_enabled(FormFields::TIME_PICKER));
        assert!(!layout.is_enabled(FormFields::CUSTOM_TIME_SWITCH));
        assert!(layout.is_enabled(FormFields::TAGS_FIELD));
    }

    #[test]
    fn pane_names_round_trip_through_strings() -> anyhow::Result<()> {
        for pane in FormPane::iter() {
            assert_eq!(FormPane::from_str(&pane.to_string())?, pane);
        }
        assert_eq!(FormPane::Details.to_string(), "details");
        Ok(())
    }
}
