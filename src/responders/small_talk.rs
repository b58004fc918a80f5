const GREETINGS: &[&str] = &[
    "👋 Xin chào! Tôi có thể giúp gì cho bạn?",
    "🤗 Chào bạn! Tôi sẵn sàng hỗ trợ.",
    "😊 Hi! Bạn cần tìm hiểu thông tin gì?",
    "👋 Xin chào! Tôi là trợ lý ảo, có thể giúp bạn tìm kiếm thông tin.",
];

const JOKES: &[&str] = &[
    "😂 Tại sao các lập trình viên lại ghét thiên nhiên? Vì có quá nhiều bugs!",
    "😆 Một lập trình viên đi mua kẹo. Anh ta nói: 'Cho tôi một pound of candy'... 'Ồ, xin lỗi, tôi muốn nói 0.45 kilograms of candy!'",
    "😄 Tại sao developer không thích đi biển? Vì họ sợ C (sea)!",
    "🤣 Có 10 loại người trên thế giới: những người hiểu nhị phân và những người không hiểu.",
];

fn pick(items: &'static [&'static str], seed: u32) -> String {
    items[seed as usize % items.len()].to_string()
}

pub fn greeting(seed: u32) -> String {
    pick(GREETINGS, seed)
}

pub fn joke(seed: u32) -> String {
    pick(JOKES, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_cycles_through_list() {
        assert_eq!(greeting(0), GREETINGS[0]);
        assert_eq!(greeting(5), GREETINGS[1]);
        assert_eq!(joke(3), JOKES[3]);
        assert_eq!(joke(u32::MAX), JOKES[u32::MAX as usize % JOKES.len()]);
    }
}
