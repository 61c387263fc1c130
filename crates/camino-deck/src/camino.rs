//! The Camino de Santiago deck: 18 slides of a 32-day, 800 km pilgrimage

use crate::assets::{DirectorySource, ImageSource};
use crate::deck::{Deck, SLIDE_WIDTH};
use crate::palette::*;
use crate::slide::{Spacing, TextStyle};
use crate::summary::DeckSummary;
use crate::{DeckConfig, Result};
use pdf_core::{Direction, Transition, TransitionKind, TransitionSpeed};
use tracing::info;

/// Document title
pub const TITLE: &str = "朝聖之路";

/// Build the deck from `config` and write the PDF
pub fn render(config: &DeckConfig) -> Result<DeckSummary> {
    let source = DirectorySource::new(&config.images_dir);
    let mut deck =
        Deck::new(source, config.font_family()?)?.with_missing_assets(config.missing_assets);

    build(&mut deck)?;
    let summary = deck.save(&config.output)?;

    info!(
        slides = summary.slides.len(),
        images = summary.image_count(),
        skipped = summary.skipped_assets.len(),
        "Deck saved to: {}",
        config.output.display()
    );
    Ok(summary)
}

/// Add all slides and their transitions to `deck`
pub fn build<S: ImageSource>(deck: &mut Deck<S>) -> Result<()> {
    deck.set_title(TITLE)?;

    hero(deck)?;
    setting_out(deck)?;
    paris(deck)?;
    estella(deck)?;
    logrono(deck)?;
    pilgrim_monument(deck)?;
    food(deck)?;
    credential(deck)?;
    last_hundred_km(deck)?;
    cathedral(deck)?;
    compostela(deck)?;
    end_of_the_world(deck)?;
    finisterre_photos(deck)?;
    cabo_da_roca(deck)?;
    portugal(deck)?;
    gallery_first(deck)?;
    gallery_second(deck)?;
    gratitude(deck)?;

    deck.apply_transitions(&transitions())?;
    Ok(())
}

/// Transition of each slide, in slide order
pub fn transitions() -> Vec<Transition> {
    (1..=18).map(transition_for).collect()
}

/// Transition of the 1-based `slide`
fn transition_for(slide: usize) -> Transition {
    use TransitionSpeed::{Medium, Slow};

    match slide {
        // Hero, cathedral and closing
        1 | 10 | 18 => Transition::new(TransitionKind::Fade, Slow),
        // End of the world
        12 => Transition::new(TransitionKind::Dissolve, Slow),
        // Paris, Logroño, food, 100 km and Cabo da Roca
        3 | 5 | 7 | 9 | 14 => Transition::new(TransitionKind::Push(Direction::Left), Medium),
        _ => Transition::new(TransitionKind::Fade, Medium),
    }
}

/// Left edge of a row of `count` boxes centered on the slide
fn centered_row_start(count: usize, box_width: f64, gap: f64) -> f64 {
    let total = count as f64 * box_width + (count - 1) as f64 * gap;
    (SLIDE_WIDTH - total) / 2.0
}

fn hero<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("朝聖之路", |s| {
        s.add_image_cover("18.jpg")?;
        s.add_overlay(0.6)?;

        s.add_textbox(
            1.0,
            1.5,
            11.3,
            1.5,
            "朝聖之路",
            TextStyle::new(60.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            1.0,
            3.0,
            11.3,
            0.7,
            "CAMINO DE SANTIAGO",
            TextStyle::new(24.0, GOLD_LIGHT).centered(),
        )?;
        s.add_gold_line(5.5, 3.8, 2.3)?;
        s.add_textbox(
            2.5,
            4.2,
            8.3,
            1.0,
            "一段徒步穿越西班牙的信仰旅程，用雙腳丈量 800 公里的恩典之路",
            TextStyle::new(18.0, WHITE).centered(),
        )?;

        let stats_y = 5.5;
        for (i, (num, label)) in [("32", "天"), ("800", "公里"), ("6", "同行者")]
            .into_iter()
            .enumerate()
        {
            let x = 3.5 + i as f64 * 2.2;
            s.add_textbox(
                x,
                stats_y,
                1.8,
                0.8,
                num,
                TextStyle::new(44.0, GOLD).bold().centered(),
            )?;
            s.add_textbox(
                x,
                stats_y + 0.75,
                1.8,
                0.4,
                label,
                TextStyle::new(14.0, WHITE).centered(),
            )?;
        }
        Ok(())
    })
}

fn setting_out<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("踏上朝聖之路", |s| {
        s.add_bg(CREAM)?;

        s.add_img_contain("01.jpg", 0.8, 0.8, 4.2, 5.9)?;

        s.add_textbox(
            5.8,
            1.2,
            6.5,
            0.8,
            "踏上朝聖之路",
            TextStyle::new(36.0, NAVY).bold(),
        )?;
        s.add_gold_line(5.8, 2.1, 1.5)?;

        s.add_textbox(
            5.8,
            2.5,
            6.8,
            2.5,
            "2025 年 5 月 10 日，背起行囊，從台灣出發前往法國巴黎蒙帕納斯，正式化身為背包客，踏上這段一生一次的朝聖旅程。",
            TextStyle::new(16.0, TEXT_DARK),
        )?
        .add_para(
            "朝聖之路（Camino de Santiago）是一條跨越千年的信仰之路，從法國南部翻越庇里牛斯山，一路徒步穿越西班牙北部，最終抵達聖地牙哥德孔波斯特拉主座教堂。",
            TextStyle::new(16.0, TEXT_LIGHT),
            Spacing::before(12.0),
        );

        s.add_panel(5.8, 5.3, 6.8, 1.2, QUOTE_PANEL, None)?;
        s.add_textbox(
            6.1,
            5.45,
            6.2,
            0.9,
            "「走了 32 天的路，800 公里的信仰之旅，每一步都是恩典。」",
            TextStyle::new(17.0, TERRACOTTA),
        )?;
        Ok(())
    })
}

fn paris<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("巴黎", |s| {
        s.add_bg(NAVY)?;

        s.add_textbox(
            0.8,
            0.5,
            3.0,
            0.4,
            "巴黎 PARIS",
            TextStyle::new(13.0, GOLD).bold(),
        )?;
        s.add_textbox(
            0.8,
            1.0,
            5.0,
            1.0,
            "在前往 SJPP 之前\n先與艾菲爾鐵塔合影",
            TextStyle::new(30.0, WHITE).bold(),
        )?;
        s.add_gold_line(0.8, 2.5, 1.5)?;
        s.add_textbox(
            0.8,
            2.9,
            5.0,
            2.5,
            "從蒙帕納斯出發前往朝聖之路的起點 Saint-Jean-Pied-de-Port，途中抽空走到艾菲爾鐵塔，為這趟旅程留下浪漫的序章。",
            TextStyle::new(16.0, SUBTLE),
        )?;

        s.add_img_contain("04.jpg", 7.2, 0.5, 5.3, 6.5)?;
        Ok(())
    })
}

fn estella<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("星星鎮", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.5,
            3.0,
            0.4,
            "西班牙",
            TextStyle::new(13.0, TERRACOTTA).bold(),
        )?;
        s.add_textbox(
            0.8,
            1.0,
            11.0,
            0.8,
            "星星鎮 Estella",
            TextStyle::new(36.0, NAVY).bold(),
        )?;
        s.add_gold_line(0.8, 1.9, 1.5)?;
        s.add_textbox(
            0.8,
            2.3,
            11.5,
            0.8,
            "翻越庇里牛斯山後進入西班牙，沿途經過充滿中世紀風情的星星鎮。古老的石板路、溫暖的陽光，每一步都踏在歷史的印記上。",
            TextStyle::new(16.0, TEXT_LIGHT),
        )?;

        s.add_img_contain("05.jpg", 0.8, 3.3, 5.0, 4.0)?;
        s.add_img_contain("06.jpg", 6.5, 3.3, 6.0, 4.0)?;
        Ok(())
    })
}

fn logrono<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("Logroño", |s| {
        s.add_bg(NAVY)?;

        s.add_img_contain("07.jpg", 0.5, 0.5, 5.2, 6.5)?;

        s.add_textbox(
            6.5,
            0.5,
            3.0,
            0.4,
            "LOGROÑO",
            TextStyle::new(13.0, GOLD).bold(),
        )?;
        s.add_textbox(
            6.5,
            1.0,
            6.3,
            1.2,
            "聖瑪利亞主教座堂",
            TextStyle::new(32.0, WHITE).bold(),
        )?;
        s.add_gold_line(6.5, 2.3, 1.5)?;
        s.add_textbox(
            6.5,
            2.7,
            6.3,
            3.0,
            "Logroño 最著名的景點 Concatedral de Santa María de la Redonda 主教座堂，歷史可以追溯到 15 世紀，教堂內珍藏米開朗基羅的油畫，並開放給朝聖者參觀。",
            TextStyle::new(16.0, SUBTLE),
        )?;
        Ok(())
    })
}

fn pilgrim_monument<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("朝聖者紀念碑", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.4,
            4.0,
            0.4,
            "聖羅克高地",
            TextStyle::new(13.0, TERRACOTTA).bold(),
        )?;
        s.add_textbox(
            0.8,
            0.9,
            11.0,
            0.8,
            "朝聖者紀念碑",
            TextStyle::new(36.0, NAVY).bold(),
        )?;
        s.add_gold_line(0.8, 1.8, 1.5)?;
        s.add_textbox(
            0.8,
            2.1,
            11.5,
            1.0,
            "聖羅克高地上的朝聖者紀念碑，傳說這位朝聖者原是個惡霸流氓，如今卻成為朝聖之路上最重要的象徵之一。許多朝聖者會在他的腳上貼上 OK 繃——因為走了這麼遠的路，誰的腳不起水泡呢？",
            TextStyle::new(15.0, TEXT_LIGHT),
        )?;

        let (box_w, box_h, gap, start_x) = (2.9, 3.8, 0.25, 0.8);
        for (i, name) in ["22.jpg", "23.jpg", "24.jpg", "25.jpg"].iter().enumerate() {
            let x = start_x + i as f64 * (box_w + gap);
            s.add_img_contain(name, x, 3.3, box_w, box_h)?;
        }
        Ok(())
    })
}

fn food<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("朝聖路上的美食", |s| {
        s.add_bg(NAVY)?;

        s.add_textbox(
            0.8,
            0.3,
            11.7,
            0.4,
            "朝聖路上的美食",
            TextStyle::new(13.0, GOLD).bold().centered(),
        )?;

        s.add_img_contain("08.jpg", 0.8, 1.2, 5.5, 5.0)?;
        s.add_textbox(
            0.8,
            6.3,
            5.5,
            0.5,
            "心心念念的蒜蘑菇",
            TextStyle::new(18.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            0.8,
            6.8,
            5.5,
            0.5,
            "在台灣就心心念念的西班牙蒜蘑菇，終於品嚐到了！",
            TextStyle::new(12.0, DIM).centered(),
        )?;

        s.add_img_contain("10.jpg", 7.0, 1.2, 5.5, 5.0)?;
        s.add_textbox(
            7.0,
            6.3,
            5.5,
            0.5,
            "薩里亞的水煮章魚",
            TextStyle::new(18.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            7.0,
            6.8,
            5.5,
            0.5,
            "進入 Sarria 前的音樂 Bar，好吃！",
            TextStyle::new(12.0, DIM).centered(),
        )?;
        Ok(())
    })
}

fn credential<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("朝聖者護照", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.5,
            4.0,
            0.4,
            "朝聖印記",
            TextStyle::new(13.0, TERRACOTTA).bold(),
        )?;
        s.add_textbox(
            0.8,
            1.0,
            5.5,
            0.8,
            "朝聖者護照",
            TextStyle::new(36.0, NAVY).bold(),
        )?;
        s.add_gold_line(0.8, 2.0, 1.5)?;
        s.add_textbox(
            0.8,
            2.4,
            5.5,
            3.0,
            "每經過一個小鎮就可獲得一個紀念章，抵達目的地時，朝聖者也依此獲發朝聖證明。\n\n早上 10:30，同行 6 人第一個到達倒數 100 公里處，一口氣走了近 15 公里！",
            TextStyle::new(16.0, TEXT_LIGHT),
        )?;

        s.add_img_contain("11.jpg", 6.5, 0.8, 6.2, 6.2)?;
        Ok(())
    })
}

fn last_hundred_km<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("倒數 100km", |s| {
        s.add_bg(NAVY)?;

        s.add_textbox(
            0.8,
            0.3,
            3.0,
            0.4,
            "100 KM",
            TextStyle::new(13.0, GOLD).bold(),
        )?;
        s.add_textbox(
            0.8,
            0.8,
            11.5,
            0.8,
            "再踏出一步就破百了！",
            TextStyle::new(36.0, WHITE).bold().centered(),
        )?;
        s.add_gold_line(5.8, 1.8, 1.8)?;
        s.add_textbox(
            2.0,
            2.1,
            9.3,
            0.7,
            "800 公里的路，已經走了 700 公里，終點就在前方。這一刻的激動難以言喻。",
            TextStyle::new(16.0, SUBTLE).centered(),
        )?;

        s.add_img_contain("12.jpg", 0.8, 3.0, 5.5, 4.3)?;
        s.add_img_contain("13.jpg", 7.0, 3.0, 5.5, 4.3)?;
        Ok(())
    })
}

fn cathedral<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("終點教堂", |s| {
        s.add_image_cover("18.jpg")?;
        s.add_overlay(0.5)?;

        s.add_textbox(
            0.8,
            0.5,
            4.0,
            0.4,
            "終點 SANTIAGO",
            TextStyle::new(13.0, GOLD).bold(),
        )?;
        s.add_textbox(
            1.0,
            2.0,
            11.3,
            1.5,
            "甩帽畢業了！",
            TextStyle::new(52.0, WHITE).bold().centered(),
        )?;
        s.add_gold_line(5.5, 3.8, 2.3)?;
        s.add_textbox(
            2.0,
            4.3,
            9.3,
            2.0,
            "朝聖之路的終點——聖地牙哥德孔波斯特拉主座教堂\n在雨中抵達這座宏偉的教堂前，將帽子拋向天空\n32 天的堅持與信念，在這一刻化為最美的回憶",
            TextStyle::new(18.0, WHITE).centered(),
        )?;
        Ok(())
    })
}

fn compostela<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("朝聖者證書", |s| {
        s.add_bg(CREAM)?;

        s.add_img_contain("26.jpg", 0.8, 0.8, 4.5, 5.9)?;

        s.add_textbox(
            6.0,
            0.5,
            4.0,
            0.4,
            "榮耀時刻",
            TextStyle::new(13.0, TERRACOTTA).bold(),
        )?;
        s.add_textbox(
            6.0,
            1.2,
            6.5,
            1.0,
            "拿到朝聖者證書了！",
            TextStyle::new(34.0, NAVY).bold(),
        )?;
        s.add_gold_line(6.0, 2.3, 1.5)?;
        s.add_textbox(
            6.0,
            2.7,
            6.5,
            3.0,
            "走了 32 天的路，終於拿到朝聖者證書了。\n\n走了 800 公里到聖地牙哥-德孔波斯特拉教堂的那一刻——快哭了。\n\n手中的兩張證書，是信仰與毅力的最佳見證。",
            TextStyle::new(16.0, TEXT_LIGHT),
        )?;
        Ok(())
    })
}

fn end_of_the_world<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("世界的盡頭", |s| {
        s.add_image_cover("16.jpg")?;
        s.add_overlay(0.55)?;

        s.add_textbox(
            1.0,
            1.2,
            11.3,
            1.2,
            "世界的盡頭",
            TextStyle::new(48.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            1.0,
            2.5,
            11.3,
            0.5,
            "FINISTERRE",
            TextStyle::new(20.0, GOLD_LIGHT).centered(),
        )?;
        s.add_gold_line(5.5, 3.3, 2.3)?;

        s.add_textbox(
            2.5,
            3.8,
            8.3,
            3.0,
            "6 月 14 日中午 11:50，來到了菲斯特雷角加利西亞海岸",
            TextStyle::new(17.0, WHITE).centered(),
        )?
        .add_para(
            "歸零里程碑 Km 0,000",
            TextStyle::new(17.0, GOLD_LIGHT).centered(),
            Spacing::before(10.0),
        )
        .add_para(
            "象徵著一切歸零，從頭開始",
            TextStyle::new(17.0, WHITE).centered(),
            Spacing::before(10.0),
        )
        .add_para(
            "願倒空自己，讓心歸零",
            TextStyle::new(22.0, GOLD).bold().centered(),
            Spacing::before(16.0),
        );
        Ok(())
    })
}

fn finisterre_photos<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("Finisterre", |s| {
        s.add_bg(NAVY)?;

        s.add_img_contain("15.jpg", 0.4, 0.5, 3.9, 6.5)?;
        s.add_img_contain("16.jpg", 4.5, 0.5, 4.4, 6.5)?;
        s.add_img_contain("17.jpg", 9.1, 0.5, 3.9, 6.5)?;
        Ok(())
    })
}

fn cabo_da_roca<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("羅卡角", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.5,
            4.0,
            0.4,
            "CABO DA ROCA",
            TextStyle::new(13.0, TERRACOTTA).bold(),
        )?;
        s.add_textbox(
            0.8,
            1.0,
            11.5,
            1.0,
            "陸止於此、海始於斯",
            TextStyle::new(38.0, NAVY).bold().centered(),
        )?;
        s.add_gold_line(5.5, 2.1, 2.3)?;
        s.add_textbox(
            2.0,
            2.5,
            9.3,
            0.7,
            "6 月 19 日來到葡萄牙 Roca 羅卡角——歐洲大陸的最西端，有人稱這也是另一個世界的盡頭。",
            TextStyle::new(16.0, TEXT_LIGHT).centered(),
        )?;

        s.add_img_contain("19.jpg", 0.8, 3.5, 5.0, 3.8)?;
        s.add_img_contain("20.jpg", 6.5, 3.5, 6.0, 3.8)?;
        Ok(())
    })
}

fn portugal<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("葡萄牙中心點", |s| {
        s.add_bg(NAVY)?;

        s.add_img_contain("21.jpg", 0.5, 0.8, 5.5, 4.8)?;
        s.add_textbox(
            0.5,
            5.8,
            5.5,
            0.5,
            "葡萄牙最中心點",
            TextStyle::new(20.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            0.5,
            6.3,
            5.5,
            0.5,
            "從這個點可以到達葡萄牙的每個城市",
            TextStyle::new(13.0, DIM).centered(),
        )?;

        s.add_img_contain("30.jpg", 6.5, 0.8, 6.3, 4.8)?;
        s.add_textbox(
            6.5,
            5.8,
            6.3,
            0.5,
            "沒錯！我們搭錯車了",
            TextStyle::new(20.0, WHITE).bold().centered(),
        )?;
        s.add_textbox(
            6.5,
            6.3,
            6.3,
            0.5,
            "旅途中的小插曲，也成了最難忘的回憶",
            TextStyle::new(13.0, DIM).centered(),
        )?;
        Ok(())
    })
}

fn gallery_first<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("旅途光影 (1/2)", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.2,
            11.5,
            0.8,
            "旅途光影",
            TextStyle::new(34.0, NAVY).bold().centered(),
        )?;
        s.add_gold_line(5.8, 1.1, 1.8)?;
        s.add_textbox(
            2.0,
            1.3,
            9.3,
            0.5,
            "沿途記錄下的美好瞬間",
            TextStyle::new(14.0, TEXT_LIGHT).centered(),
        )?;

        let images = ["02.jpg", "03.jpg", "09.jpg", "14.jpg"];
        let (box_w, box_h, gap) = (2.8, 5.0, 0.3);
        let start_x = centered_row_start(images.len(), box_w, gap);
        for (i, name) in images.iter().enumerate() {
            let x = start_x + i as f64 * (box_w + gap);
            s.add_img_contain(name, x, 2.1, box_w, box_h)?;
        }
        Ok(())
    })
}

fn gallery_second<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("旅途光影 (2/2)", |s| {
        s.add_bg(CREAM)?;

        s.add_textbox(
            0.8,
            0.2,
            11.5,
            0.8,
            "旅途光影",
            TextStyle::new(34.0, NAVY).bold().centered(),
        )?;
        s.add_gold_line(5.8, 1.1, 1.8)?;

        let images = ["27.jpg", "28.jpg", "29.jpg"];
        let (box_w, box_h, gap) = (3.2, 5.3, 0.4);
        let start_x = centered_row_start(images.len(), box_w, gap);
        for (i, name) in images.iter().enumerate() {
            let x = start_x + i as f64 * (box_w + gap);
            s.add_img_contain(name, x, 1.6, box_w, box_h)?;
        }
        Ok(())
    })
}

fn gratitude<S: ImageSource>(deck: &mut Deck<S>) -> Result<usize> {
    deck.add_slide("感恩結語", |s| {
        s.add_bg(NAVY)?;

        s.add_textbox(
            1.0,
            0.8,
            11.3,
            1.0,
            "感恩 · 歸零 · 再出發",
            TextStyle::new(42.0, GOLD).bold().centered(),
        )?;
        s.add_gold_line(5.5, 2.0, 2.3)?;

        let body = TextStyle::new(17.0, WHITE).centered();
        s.add_textbox(
            2.0,
            2.5,
            9.3,
            1.5,
            "32 天，800 公里，從法國巴黎到西班牙聖地牙哥，再到世界的盡頭菲斯特雷角。",
            body,
        )?
        .add_para(
            "每一步都是信心的操練，每一天都是恩典的經歷。",
            body,
            Spacing::before(8.0),
        )
        .add_para(
            "這不只是一段徒步旅行，更是一場與自己、與信仰的深度對話。",
            body,
            Spacing::before(8.0),
        );

        s.add_panel(3.0, 4.8, 7.3, 1.5, VERSE_PANEL, Some((VERSE_OUTLINE, 1.0)))?;
        s.add_textbox(
            3.3,
            5.0,
            6.7,
            0.6,
            "「你的話是我腳前的燈，是我路上的光。」",
            TextStyle::new(20.0, GOLD_LIGHT).centered(),
        )?;
        s.add_textbox(
            3.3,
            5.65,
            6.7,
            0.4,
            "—— 詩篇 119:105",
            TextStyle::new(14.0, CITATION).centered(),
        )?;
        s.add_textbox(
            2.0,
            6.5,
            9.3,
            0.6,
            "願將這段旅程的感動，與教會的弟兄姊妹們分享",
            TextStyle::new(17.0, GOLD_LIGHT).centered(),
        )?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_transition_per_slide() {
        assert_eq!(transitions().len(), 18);
    }

    #[test]
    fn test_transition_table() {
        let table = transitions();
        let left = TransitionKind::Push(Direction::Left);
        let push = Transition::new(left, TransitionSpeed::Medium);
        let slow_fade = Transition::new(TransitionKind::Fade, TransitionSpeed::Slow);

        for slide in [3, 5, 7, 9, 14] {
            assert_eq!(table[slide - 1], push, "slide {slide}");
        }
        for slide in [1, 10, 18] {
            assert_eq!(table[slide - 1], slow_fade, "slide {slide}");
        }
        assert_eq!(table[11].kind, TransitionKind::Dissolve);
        assert_eq!(table[11].speed, TransitionSpeed::Slow);

        // Everything else fades at medium speed
        let medium_fades = table
            .iter()
            .filter(|t| t.kind == TransitionKind::Fade && t.speed == TransitionSpeed::Medium)
            .count();
        assert_eq!(medium_fades, 9);
        assert!(table.iter().all(|t| t.advance_after.is_none()));
    }

    #[test]
    fn test_centered_rows() {
        // Four 2.8 in boxes with 0.3 in gaps
        assert!((centered_row_start(4, 2.8, 0.3) - 0.6165).abs() < 1e-9);
        // Three 3.2 in boxes with 0.4 in gaps
        assert!((centered_row_start(3, 3.2, 0.4) - 1.4665).abs() < 1e-9);
    }
}
