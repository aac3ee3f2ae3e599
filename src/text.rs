//! Instruction copy for every screen of the walkthrough.
//!
//! The wording depends on the session (chosen shot, grams, countdown phase)
//! so each function takes the session and returns finished paragraphs.

use crate::recipe::{
    self, Method, Roast, ShotSize, BLOOM_WAIT_SECS, BLOOM_WATER_GRAMS, COLDBREW_RECOMMENDED_GRAMS,
    COLDBREW_STEEP_HOURS, POUR_PORTION_ML, PUCK_GAP_MM, PURGE_GRAMS, STALE_BEANS_DOUBLE_DOSE,
};
use crate::session::{Phase, Session, Step};

pub fn title(step: Step) -> &'static str {
    match step {
        Step::Start => "Какой напиток готовим?",
        Step::EspressoShot => "Какой объём?",
        Step::EspressoInstruction => "Эспрессо",
        Step::FilterCups => "Сколько чашек кофе будем заваривать?",
        Step::FilterSlider => "Выберите количество кофе (грамм)",
        Step::FilterReady => "Подготовка",
        Step::FilterBrew => "Заваривание",
        Step::ColdbrewGrams => "Сколько грамм кофе будем заваривать?",
        Step::ColdbrewInstruction => "Колд-брю",
    }
}

pub fn method_label(method: Method) -> &'static str {
    match method {
        Method::Espresso => "Эспрессо",
        Method::Filter => "Фильтр",
        Method::ColdBrew => "Колд-брю",
    }
}

pub fn shot_label(shot: ShotSize) -> &'static str {
    match shot {
        ShotSize::Single => "одиночный",
        ShotSize::Double => "двойной",
    }
}

/// Menu entries offered on choice screens, in key order.
pub fn options(step: Step) -> &'static [&'static str] {
    match step {
        Step::Start => &["Эспрессо", "Фильтр", "Колд-брю"],
        Step::EspressoShot => &["Одиночный шот", "Двойной шот"],
        Step::FilterCups => &["1 чашка", "2 чашки", "3 чашки"],
        _ => &[],
    }
}

pub fn cups_label(cups: u8) -> String {
    if cups == 1 {
        format!("{cups} чашка")
    } else {
        format!("{cups} чашки")
    }
}

pub fn body(session: &Session) -> Vec<String> {
    match session.step() {
        Step::Start | Step::FilterCups => Vec::new(),
        Step::EspressoShot => vec![
            "Лучше всегда готовить кофе в двойной корзине, так как в ней экстракция \
             стабильнее и равномернее, за счет более ровного строения сетки."
                .to_string(),
        ],
        Step::EspressoInstruction => espresso_body(session),
        Step::FilterSlider => {
            let water = recipe::filter_water_ml(session.grams());
            vec![
                format!("{} г кофе", session.grams()),
                format!("Вам понадобится {water} мл. кипяченой воды"),
                temperature_line(),
            ]
        }
        Step::FilterReady => vec![
            "Промочите фильтр небольшим количеством воды.".to_string(),
            "Положите кофе в вашу V60 и сделайте небольшое отверстие в середине слоя."
                .to_string(),
        ],
        Step::FilterBrew => filter_brew_body(session),
        Step::ColdbrewGrams => {
            let (lo, hi) = COLDBREW_RECOMMENDED_GRAMS;
            vec![
                format!("Рекомендуется от {lo} до {hi} грамм."),
                format!("{} г кофе", session.grams()),
                format!(
                    "Вам понадобится {} мл. воды",
                    recipe::coldbrew_water_ml(session.grams())
                ),
            ]
        }
        Step::ColdbrewInstruction => {
            let steep = format!(
                "Залейте бутылку водой, взболтайте аккуратно круговыми движениями. \
                 Уберите в холодильник на {COLDBREW_STEEP_HOURS} часов."
            );
            vec![steep]
        }
    }
}

fn temperature_line() -> String {
    let bands = Roast::ALL
        .iter()
        .map(|roast| {
            let name = match roast {
                Roast::Light => "светлая обжарка",
                Roast::Medium => "средняя",
                Roast::Dark => "тёмная",
            };
            match roast.water_temp_celsius() {
                (lo, hi) if lo == hi => format!("{name}: {lo}°C"),
                (lo, hi) => format!("{name}: {lo}–{hi}°C"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("({bands})")
}

fn espresso_body(session: &Session) -> Vec<String> {
    let Some(shot) = session.shot_size() else {
        return Vec::new();
    };

    let dose = format!(
        "Возьмите {} грамм молотого кофе и проведите темперовку",
        shot.dose_grams()
    );
    let mut lines = vec![dose];

    match session.phase() {
        Phase::Prepare => match shot {
            ShotSize::Single => {
                let (lo, hi) = PURGE_GRAMS;
                lines.push(format!(
                    "Если это первый шот на сегодня — рекомендуется смолоть перед \
                     приготовлением дополнительные {lo}–{hi} грамм кофе на выброс для того, \
                     чтобы из каналов кофемолки вышел старый, окисленный молотый кофе, \
                     который неизбежно остается после каждого приготовления."
                ));
            }
            ShotSize::Double => {
                let (lo, hi) = PUCK_GAP_MM;
                lines.push(format!(
                    "Закладка зависит от свежести кофейного зерна. Если у вас кофе стоит \
                     больше месяца, то стоит начать от {STALE_BEANS_DOUBLE_DOSE} грамм и выше."
                ));
                lines.push("Проведите темперовку.".to_string());
                lines.push(format!(
                    "Расстояние от дисперсионной сетки на внутренней части кофейной группы \
                     до таблетки с кофе после темперовки должно равняться {lo}–{hi} мм."
                ));
                lines.push(
                    "Вставьте холдер с кофе после темперовки в кофейную группу и достаньте \
                     обратно — кофейная таблетка должна выглядеть без изменений и не иметь \
                     в себе выраженных дефектов."
                        .to_string(),
                );
            }
        },
        Phase::Brewing { remaining, .. } => {
            lines.push(format!("Заваривание... Осталось {remaining} секунд"));
        }
        Phase::Done => {
            lines.push("Напиток готов.".to_string());
            lines.push(format!(
                "Ваш напиток должен быть объёмом {} грамм.",
                shot.yield_grams()
            ));
            lines.push(
                "Если меньше — увеличьте помол, если больше — уменьшите объём."
                    .to_string(),
            );
        }
    }
    lines
}

fn filter_brew_body(session: &Session) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Налейте {BLOOM_WATER_GRAMS} г воды для цветения и подождите {BLOOM_WAIT_SECS} секунд."
        ),
        format!(
            "Медленно круговыми движениями от центра к краям вливайте воду по \
             {POUR_PORTION_ML} мл и делайте паузы."
        ),
        "К концу таймера вся вода должна оказаться в сервировочном чайнике \
         (допустимы отклонения)."
            .to_string(),
    ];
    match session.phase() {
        Phase::Brewing { remaining, .. } => lines.push(format!("Осталось {remaining} секунд")),
        Phase::Done => lines.push("Заваривание завершено!".to_string()),
        Phase::Prepare => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_step_has_a_title() {
        for step in Step::ALL {
            assert!(!title(step).is_empty());
        }
    }

    #[test]
    fn test_options_for_choice_screens() {
        assert_eq!(options(Step::Start).len(), 3);
        assert_eq!(options(Step::EspressoShot).len(), 2);
        assert_eq!(options(Step::FilterCups).len(), 3);
        assert!(options(Step::FilterBrew).is_empty());
    }

    #[test]
    fn test_cups_label() {
        assert_eq!(cups_label(1), "1 чашка");
        assert_eq!(cups_label(3), "3 чашки");
    }

    #[test]
    fn test_espresso_done_mentions_yield() {
        let mut session = Session::new();
        session.select_method(Method::Espresso).unwrap();
        session.select_shot(ShotSize::Double).unwrap();
        session.confirm_and_brew().unwrap();
        for _ in 0..30 {
            session.tick();
        }
        let text = body(&session).join("\n");
        assert!(text.contains("18 грамм молотого"));
        assert!(text.contains("36 грамм."));
    }

    #[test]
    fn test_espresso_brewing_shows_remaining() {
        let mut session = Session::new();
        session.select_method(Method::Espresso).unwrap();
        session.select_shot(ShotSize::Single).unwrap();
        session.confirm_and_brew().unwrap();
        session.tick();
        let text = body(&session).join("\n");
        assert!(text.contains("Осталось 29 секунд"));
    }

    #[test]
    fn test_filter_slider_shows_water_and_temperature() {
        let mut session = Session::new();
        session.select_method(Method::Filter).unwrap();
        session.select_cup_count(2).unwrap();
        session.adjust_grams(40).unwrap();
        let text = body(&session).join("\n");
        assert!(text.contains("640 мл"));
        assert!(text.contains("светлая обжарка: 100°C"));
        assert!(text.contains("средняя: 90–95°C"));
    }

    #[test]
    fn test_coldbrew_shows_water() {
        let mut session = Session::new();
        session.select_method(Method::ColdBrew).unwrap();
        session.adjust_grams(60).unwrap();
        assert!(body(&session).iter().any(|l| l.contains("480 мл")));
    }
}
